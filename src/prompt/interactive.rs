//! Asking the selection questions on the terminal

use inquire::{MultiSelect, Select};

use super::{
    Action, Answer, CANCEL_CHOICE, Question, Selection, available_actions, next_question,
};
use crate::config::{FvmConfig, host_versions, package_versions};
use crate::domain::{PackageDescriptor, PackageKind};
use crate::error::Result;

const HELP: &str = "  ↑↓ navigate  enter confirm  type to filter  esc cancel";
const MULTI_HELP: &str = "  ↑↓ navigate  space select  enter confirm  type to filter  esc cancel";

/// Presents choices and returns the chosen indices.
///
/// `None` means the user dismissed the prompt.
pub trait Prompter {
    fn select(&self, message: &str, options: Vec<String>) -> Result<Option<usize>>;

    fn multi_select(&self, message: &str, options: Vec<String>) -> Result<Option<Vec<usize>>>;
}

/// Prompter backed by `inquire`
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn select(&self, message: &str, options: Vec<String>) -> Result<Option<usize>> {
        let chosen = Select::new(message, options)
            .with_page_size(10)
            .with_help_message(HELP)
            .raw_prompt_skippable()?;
        Ok(chosen.map(|option| option.index))
    }

    fn multi_select(&self, message: &str, options: Vec<String>) -> Result<Option<Vec<usize>>> {
        let chosen = MultiSelect::new(message, options)
            .with_page_size(10)
            .with_help_message(MULTI_HELP)
            .raw_prompt_skippable()?;
        Ok(chosen.map(|options| options.into_iter().map(|option| option.index).collect()))
    }
}

fn pick_version(
    prompter: &dyn Prompter,
    question: &Question,
    mut versions: Vec<PackageDescriptor>,
) -> Result<Option<PackageDescriptor>> {
    let labels = versions.iter().map(|d| d.version.clone()).collect();
    let index = prompter.select(&question.message(), labels)?;
    Ok(index
        .filter(|&i| i < versions.len())
        .map(|i| versions.swap_remove(i)))
}

/// Ask one question. `None` means the user dismissed it.
fn ask(
    prompter: &dyn Prompter,
    config: &FvmConfig,
    question: &Question,
) -> Result<Option<Answer>> {
    let message = question.message();

    let answer = match question {
        Question::WhatToDo => {
            let actions = available_actions(config);
            let labels = actions.iter().map(|a| a.label().to_string()).collect();
            prompter
                .select(&message, labels)?
                .and_then(|i| actions.get(i).copied())
                .map(Answer::Action)
        }
        Question::SystemName => {
            let mut labels: Vec<String> =
                config.systems.iter().map(|s| s.name.clone()).collect();
            labels.push(CANCEL_CHOICE.to_string());
            let cancel = labels.len() - 1;
            prompter.select(&message, labels.clone())?.and_then(|i| {
                if i == cancel {
                    Some(Answer::Cancel)
                } else {
                    labels.get(i).cloned().map(Answer::SystemName)
                }
            })
        }
        Question::SystemVersion(name) => {
            let versions = package_versions(&config.systems, PackageKind::System, name)?;
            pick_version(prompter, question, versions)?.map(Answer::System)
        }
        Question::ModuleNames => {
            let names: Vec<String> = config.modules.iter().map(|m| m.name.clone()).collect();
            prompter.multi_select(&message, names.clone())?.map(|indices| {
                Answer::ModuleNames(
                    indices
                        .into_iter()
                        .filter_map(|i| names.get(i).cloned())
                        .collect(),
                )
            })
        }
        Question::ModuleVersion(name) => {
            let versions = package_versions(&config.modules, PackageKind::Module, name)?;
            pick_version(prompter, question, versions)?.map(Answer::Module)
        }
        Question::HostVersion => {
            let mut versions = host_versions(&config.foundry_path)?;
            prompter
                .select(&message, versions.clone())?
                .filter(|&i| i < versions.len())
                .map(|i| Answer::HostVersion(versions.swap_remove(i)))
        }
    };

    Ok(answer)
}

/// Run the question flow until the selection is complete.
///
/// Dismissing the first question returns `None`; dismissing any later one
/// goes back to the start.
pub fn run(prompter: &dyn Prompter, config: &FvmConfig) -> Result<Option<Selection>> {
    let mut selection = Selection::default();

    while let Some(question) = next_question(&selection) {
        let answer = match ask(prompter, config, &question)? {
            Some(answer) => answer,
            None if question == Question::WhatToDo => return Ok(None),
            None => Answer::Cancel,
        };
        log::debug!("{question:?} -> {answer:?}");
        selection = selection.apply(answer);
    }

    Ok(Some(selection))
}

/// One-line summary of a selection
pub fn describe(selection: &Selection) -> String {
    let action = selection.action().map_or("Nothing", Action::label);
    let mut parts = vec![action.to_string()];
    if let Some(system) = selection.system() {
        parts.push(format!("system {}", system.label()));
    }
    for module in selection.modules() {
        parts.push(format!("module {}", module.label()));
    }
    if let Some(version) = selection.host_version() {
        parts.push(format!("Foundry {version}"));
    }
    parts.join(", ")
}
