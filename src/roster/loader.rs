use std::path::Path;

use tracing::{debug, info, instrument, warn};

use super::{Roster, RosterError};

const TEAM_SEPARATOR: char = ':';
const PARTICIPANT_SEPARATOR: char = ',';

/// Reads a roster file in the `team: participant, participant, ...` format.
///
/// An unreadable file is fatal. Malformed lines are skipped with a warning.
#[instrument]
pub async fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RosterError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let roster = parse_roster(&text);
    debug!(teams = ?roster.teams().collect::<Vec<_>>(), "Roster teams");
    info!(
        teams = roster.team_count(),
        participants = roster.participant_count(),
        "Roster loaded"
    );
    Ok(roster)
}

pub fn parse_roster(text: &str) -> Roster {
    let mut roster = Roster::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let Some((team, members)) = line.split_once(TEAM_SEPARATOR) else {
            warn!(line = line_number, "Team is undefined, row is skipped");
            continue;
        };

        let team = trim_token(team);
        if team.is_empty() {
            warn!(line = line_number, "Team name is empty, row is skipped");
            continue;
        }

        let participants: Vec<String> = members
            .split(PARTICIPANT_SEPARATOR)
            .map(trim_token)
            .filter(|participant| !participant.is_empty())
            .map(str::to_string)
            .collect();

        debug!(
            line = line_number,
            team = %team,
            participants = participants.len(),
            "Parsed roster row"
        );

        if roster.insert_team(team, participants).is_some() {
            warn!(line = line_number, team = %team, "Team listed again, later row wins");
        }
    }

    roster
}

fn trim_token(token: &str) -> &str {
    token.trim_matches(|c| c == ' ' || c == '\t')
}
