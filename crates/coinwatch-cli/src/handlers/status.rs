//! Status command handler.
//!
//! Reports per-provider availability, specializations, and usage counters
//! from the router.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::print_separator;

pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let statuses = ctx.router.statuses();

    println!("Providers ({}):", statuses.len());
    print_separator(60);
    for status in &statuses {
        let state = if status.available { "available" } else { "unavailable" };
        let specs: Vec<&str> = status
            .specializations
            .iter()
            .map(|op| op.as_str())
            .collect();

        println!("{:<15} {state}", status.name);
        println!("  specializes   {}", specs.join(", "));
        println!(
            "  calls         {} ({} failed)",
            status.calls, status.failures
        );
        if let Some(error) = &status.last_error {
            println!("  last error    {error}");
        }
        println!(
            "  last check    {}",
            status.last_check.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}
