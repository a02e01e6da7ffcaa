// Step plan for agent runs
//
// Every run currently gets the same four steps regardless of the task text.

use crate::domain::agent::Step;

/// Descriptions of the fixed plan, in execution order
pub const STEP_DESCRIPTIONS: [&str; 4] = [
    "Analyzing task requirements",
    "Breaking down into subtasks",
    "Executing main task logic",
    "Generating final output",
];

/// Builds the pending step list for a task
///
/// Step ids are their 1-based positions (`"1"`..`"4"`).
pub fn steps_for_task(_task: &str) -> Vec<Step> {
    STEP_DESCRIPTIONS
        .iter()
        .enumerate()
        .map(|(index, description)| Step::new((index + 1).to_string(), *description))
        .collect()
}
