//! Crew roster decoding and agency enrichment

pub mod enrichment;

pub use enrichment::{
    affiliation_for_craft, enrich, parse_roster, Affiliation, CrewMember, CrewRoster, CrewSummary,
    EnrichedCrewMember, DEFAULT_GREETING,
};
