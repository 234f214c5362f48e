//! Interactive confirmation prompt for large invocations.
//!
//! ```text
//! ============================================================
//!   CONFIRMATION REQUIRED
//! ============================================================
//! You are about to invoke 30 agents.
//! This will take approximately 17.0 minutes
//! and cost approximately $3.00
//!
//! LARGE INVOCATION - DOUBLE CONFIRMATION REQUIRED
//! Type 'YES' to proceed:
//! ```

use colored::Colorize;
use rollcall_application::ports::confirmation::{ConfirmationError, ConfirmationPort};
use rollcall_domain::planning::DOUBLE_CONFIRMATION_TOKEN;
use rollcall_domain::{ConfirmationLevel, InvocationPlan};
use std::io::{self, BufRead, Write};

/// Terminal-based implementation of [`ConfirmationPort`].
///
/// Single confirmation accepts `y`, `yes` or an empty answer; double
/// confirmation accepts only the literal `YES`. End of input cancels.
pub struct InteractiveConfirmation;

impl InteractiveConfirmation {
    pub fn new() -> Self {
        Self
    }

    fn display_prompt(&self, plan: &InvocationPlan, level: ConfirmationLevel) {
        let line = "=".repeat(60);
        println!();
        println!("{}", line.yellow().bold());
        println!("{}", "  CONFIRMATION REQUIRED".yellow().bold());
        println!("{}", line.yellow().bold());
        println!("You are about to invoke {} agents.", plan.agent_count());
        println!(
            "This will take approximately {:.1} minutes",
            plan.estimated_time
        );
        println!("and cost approximately ${:.2}", plan.estimated_cost);

        if level == ConfirmationLevel::Double {
            println!();
            println!(
                "{}",
                "LARGE INVOCATION - DOUBLE CONFIRMATION REQUIRED".red().bold()
            );
        }
    }

    fn read_answer(&self, prompt: &str) -> Result<String, ConfirmationError> {
        print!("\n{} ", prompt.bold());
        io::stdout().flush().map_err(|e| {
            ConfirmationError::IoError(format!("Failed to flush stdout: {}", e))
        })?;

        read_line(&mut io::stdin().lock())
    }
}

/// Read one answer line; `Cancelled` at end of input.
fn read_line(reader: &mut impl BufRead) -> Result<String, ConfirmationError> {
    let mut input = String::new();
    let read = reader
        .read_line(&mut input)
        .map_err(|e| ConfirmationError::IoError(format!("Failed to read input: {}", e)))?;
    if read == 0 {
        return Err(ConfirmationError::Cancelled);
    }
    Ok(input.trim().to_string())
}

fn prompt_for(level: ConfirmationLevel) -> String {
    match level {
        ConfirmationLevel::Double => format!("Type '{}' to proceed:", DOUBLE_CONFIRMATION_TOKEN),
        _ => "Proceed? [Y/n]:".to_string(),
    }
}

impl Default for InteractiveConfirmation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationPort for InteractiveConfirmation {
    fn confirm(
        &self,
        plan: &InvocationPlan,
        level: ConfirmationLevel,
    ) -> Result<bool, ConfirmationError> {
        self.display_prompt(plan, level);
        let answer = self.read_answer(&prompt_for(level))?;
        let approved = level.accepts(&answer);

        println!();
        if approved {
            println!("{}", "Invocation approved".green());
        } else {
            println!("{}", "Invocation declined".red());
        }
        Ok(approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_trims() {
        let mut input = Cursor::new("  yes \n");
        assert_eq!(read_line(&mut input).unwrap(), "yes");
    }

    #[test]
    fn test_read_line_empty_answer() {
        let mut input = Cursor::new("\n");
        assert_eq!(read_line(&mut input).unwrap(), "");
    }

    #[test]
    fn test_end_of_input_cancels() {
        let mut input = Cursor::new("");
        assert_eq!(read_line(&mut input), Err(ConfirmationError::Cancelled));
    }

    #[test]
    fn test_prompt_per_level() {
        assert_eq!(prompt_for(ConfirmationLevel::Single), "Proceed? [Y/n]:");
        assert_eq!(
            prompt_for(ConfirmationLevel::Double),
            "Type 'YES' to proceed:"
        );
    }
}
