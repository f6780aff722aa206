use crate::support::exit_with;
use ropa_oscal::implemented_requirements_file;

pub fn run(profile: String, out: String) {
    let requirements =
        implemented_requirements_file(&profile, &out).unwrap_or_else(|err| exit_with(err, 1));
    println!(
        "Wrote {} implemented-requirements → {out}",
        requirements.len()
    );
}
