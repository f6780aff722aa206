use crate::support::exit_with;
use ropa_oscal::{OscalError, resolve_profile_file};

pub fn run(profile: String, catalog: String, out: String) {
    let resolved = resolve_profile_file(&profile, &catalog, &out).unwrap_or_else(|err| {
        let code = match err {
            OscalError::NoIncludedControls => 2,
            OscalError::Document(_) => 1,
        };
        exit_with(err, code)
    });
    println!(
        "Resolved catalog written: {out} (controls={})",
        resolved.included.len()
    );
}
