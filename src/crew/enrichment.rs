//! Maps each crew member's craft to a country and operating agency, and
//! summarises the crew currently in space.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Suffix appended to each greeting line when none is given
pub const DEFAULT_GREETING: &str = "Hello! :)";

/// One person in space, as listed by the Open Notify `astros.json` feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    pub name: String,
    pub craft: String,
}

/// The `astros.json` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewRoster {
    pub number: u32,
    pub people: Vec<CrewMember>,
}

/// Decode an `astros.json` document
pub fn parse_roster(json: &str) -> Result<CrewRoster, serde_json::Error> {
    serde_json::from_str(json)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affiliation {
    pub country: String,
    pub agency: String,
}

impl Affiliation {
    fn new(country: &str, agency: &str) -> Self {
        Self {
            country: country.to_string(),
            agency: agency.to_string(),
        }
    }
}

/// Guess a crew member's country and agency from the craft name.
///
/// Rules are checked in order; the first match wins.
pub fn affiliation_for_craft(craft: &str) -> Affiliation {
    if craft.contains("ISS") {
        Affiliation::new("International", "ISS Expedition")
    } else if craft.contains("Shenzhou") || craft.contains("Tiangong") {
        Affiliation::new("China", "China National Space Administration")
    } else if craft.contains("Soyuz") {
        Affiliation::new("Russia", "Roscosmos")
    } else if craft.contains("Dragon") {
        Affiliation::new("USA", "SpaceX")
    } else {
        Affiliation::new("International", "Space Agency")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedCrewMember {
    pub name: String,
    pub craft: String,
    pub country: String,
    pub agency: String,
}

impl EnrichedCrewMember {
    pub fn greeting_line(&self, greeting: &str) -> String {
        format!(
            "{} from {} ({}) is currently in space flying on the {}! {}",
            self.name, self.country, self.agency, self.craft, greeting
        )
    }
}

pub fn enrich(members: &[CrewMember]) -> Vec<EnrichedCrewMember> {
    members
        .iter()
        .map(|member| {
            let Affiliation { country, agency } = affiliation_for_craft(&member.craft);
            EnrichedCrewMember {
                name: member.name.clone(),
                craft: member.craft.clone(),
                country,
                agency,
            }
        })
        .collect()
}

/// Headcount plus the distinct countries and agencies, sorted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewSummary {
    /// Number of people in space as reported by the feed
    pub headcount: u32,
    /// Number of people actually listed in the feed
    pub listed: usize,
    pub countries: Vec<String>,
    pub agencies: Vec<String>,
}

impl CrewSummary {
    /// Summarise a roster; the headcount is the feed's own `number`.
    pub fn from_roster(roster: &CrewRoster) -> Self {
        let members = enrich(&roster.people);
        let countries: BTreeSet<&str> = members.iter().map(|m| m.country.as_str()).collect();
        let agencies: BTreeSet<&str> = members.iter().map(|m| m.agency.as_str()).collect();

        let summary = Self {
            headcount: roster.number,
            listed: members.len(),
            countries: countries.into_iter().map(String::from).collect(),
            agencies: agencies.into_iter().map(String::from).collect(),
        };
        if !summary.is_consistent() {
            warn!(reported = summary.headcount, listed = summary.listed, "crew headcount does not match roster");
        }
        summary
    }

    /// Reported headcount agrees with the number of listed people
    pub fn is_consistent(&self) -> bool {
        self.headcount as usize == self.listed
    }
}
