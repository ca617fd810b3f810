// Ank Numerology - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod reducer;
pub mod chaldean;
pub mod date;
pub mod loshu;
pub mod numerology;
pub mod interpretations;
pub mod validation;
pub mod config;
pub mod db;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use reducer::{digit_sum, reduce, ReduceMode};
pub use chaldean::{letter_value, name_number, name_total};
pub use date::{bhagyank, destiny, dob_number, moolank, BirthDate, DateParseError};
pub use loshu::{build_grid, grid_digits, LoShuGrid, EMPTY_CELL, PLACEMENT};
pub use numerology::{
    angel_number, calculate, Calculation, Gender, NumerologyInput, NumerologyResult,
};
pub use interpretations::{dc_analysis, interpretation, phase_analysis, DcAnalysis, PhaseAnalysis};
pub use validation::{validate_required, UserForm, ValidationError, ValidationResult};
pub use config::AppConfig;
pub use db::{
    Event, ImportSummary, SaveUserRequest, UserRecord,
    setup_database, open_database, insert_user, insert_event,
    verify_count, load_csv, import_forms,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Message returned by `POST /saveUser` on success
pub const SAVE_SUCCESS_MESSAGE: &str = "✅ User saved successfully!";

/// Message returned by `POST /saveUser` on any failure
pub const SAVE_FAILURE_MESSAGE: &str = "Error saving user";
