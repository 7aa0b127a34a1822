//! Trip pricing for chauffeur-driven transport quotes: day/night distance
//! split, night and Sunday/holiday surcharges, minimum fare and distance,
//! waiting time increments and VAT-inclusive totals.

pub mod api;
pub mod config;
pub mod db;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
