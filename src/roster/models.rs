use std::collections::BTreeMap;

/// Teams and the participants registered under each of them.
///
/// Built once before dispatch and only read afterwards. The same participant
/// may appear under several teams; every occurrence is a separate entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    teams: BTreeMap<String, Vec<String>>,
}

/// One `(team, participant)` pair to be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub team: String,
    pub participant: String,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            teams: BTreeMap::new(),
        }
    }

    /// Registers a team, replacing any participants it already had.
    ///
    /// Returns the previous participant list when the team was already known.
    pub fn insert_team(
        &mut self,
        team: impl Into<String>,
        participants: Vec<String>,
    ) -> Option<Vec<String>> {
        self.teams.insert(team.into(), participants)
    }

    pub fn participants(&self, team: &str) -> Option<&[String]> {
        self.teams.get(team).map(Vec::as_slice)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Total number of lookups a dispatch of this roster issues.
    pub fn participant_count(&self) -> usize {
        self.teams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.participant_count() == 0
    }

    pub fn entries(&self) -> impl Iterator<Item = RosterEntry> + '_ {
        self.teams.iter().flat_map(|(team, participants)| {
            participants.iter().map(move |participant| RosterEntry {
                team: team.clone(),
                participant: participant.clone(),
            })
        })
    }
}

impl<T, P> FromIterator<(T, Vec<P>)> for Roster
where
    T: Into<String>,
    P: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, Vec<P>)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (team, participants) in iter {
            roster.insert_team(team, participants.into_iter().map(Into::into).collect());
        }
        roster
    }
}
