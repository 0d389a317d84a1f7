use std::collections::BTreeMap;

use super::{CollectorError, ResultRecord, Standings};

/// Ranks collected records.
///
/// Failed lookups stay in the ranking with a score of 0. Participants that
/// never reported are absent from both the individual ranking and their
/// team's total.
pub fn rank(records: &[ResultRecord]) -> Result<Standings, CollectorError> {
    let totals = team_totals(records);
    let (winning_team, winning_total) = winning_team(&totals)
        .map(|(team, total)| (team.to_string(), total))
        .ok_or(CollectorError::EmptyCollection)?;

    Ok(Standings {
        individual: individual_ranking(records),
        team_totals: totals,
        winning_team,
        winning_total,
    })
}

/// Records by descending score. The sort is stable, so equal scores keep
/// their arrival order.
pub fn individual_ranking(records: &[ResultRecord]) -> Vec<ResultRecord> {
    let mut ranking = records.to_vec();
    ranking.sort_by(|a, b| b.score().cmp(&a.score()));
    ranking
}

pub fn team_totals(records: &[ResultRecord]) -> BTreeMap<String, i64> {
    records
        .iter()
        .fold(BTreeMap::new(), |mut totals, record| {
            *totals.entry(record.team.clone()).or_insert(0) += record.score();
            totals
        })
}

/// Team with the highest total. Equal totals go to the lexicographically
/// smallest team name.
pub fn winning_team(totals: &BTreeMap<String, i64>) -> Option<(&str, i64)> {
    totals
        .iter()
        .fold(None, |best: Option<(&str, i64)>, (team, &total)| match best {
            Some((_, best_total)) if best_total >= total => best,
            _ => Some((team.as_str(), total)),
        })
}
