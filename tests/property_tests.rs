#[path = "property/invariants.rs"]
mod invariants;
