//! Interactive selection of what to stage and launch
//!
//! The flow is a sequence of questions. [`next_question`] looks at the
//! [`Selection`] gathered so far and returns what to ask next;
//! [`Selection::apply`] folds an [`Answer`] into a new selection. Both are
//! pure, the terminal side lives in [`interactive`].

pub mod interactive;

use std::fmt;

use crate::config::FvmConfig;
use crate::domain::PackageDescriptor;

/// Label of the extra choice that returns to the first question
pub const CANCEL_CHOICE: &str = "Cancel";

/// Top-level choice of the first question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartFoundry,
    SelectModules,
    SelectSystem,
    SelectAllAndStart,
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Action::StartFoundry => "Start Foundry",
            Action::SelectModules => "Select Modules",
            Action::SelectSystem => "Select System",
            Action::SelectAllAndStart => "Select System and Modules and start Foundry",
        }
    }

    pub fn includes_system(self) -> bool {
        matches!(self, Action::SelectSystem | Action::SelectAllAndStart)
    }

    pub fn includes_modules(self) -> bool {
        matches!(self, Action::SelectModules | Action::SelectAllAndStart)
    }

    pub fn launches(self) -> bool {
        matches!(self, Action::StartFoundry | Action::SelectAllAndStart)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Actions offered for this configuration, in menu order
pub fn available_actions(config: &FvmConfig) -> Vec<Action> {
    let has_systems = !config.systems.is_empty();
    let has_modules = !config.modules.is_empty();

    let mut actions = vec![Action::StartFoundry];
    if has_modules {
        actions.push(Action::SelectModules);
    }
    if has_systems {
        actions.push(Action::SelectSystem);
    }
    if has_systems || has_modules {
        actions.push(Action::SelectAllAndStart);
    }
    actions
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    WhatToDo,
    SystemName,
    SystemVersion(String),
    ModuleNames,
    ModuleVersion(String),
    HostVersion,
}

impl Question {
    pub fn message(&self) -> String {
        match self {
            Question::WhatToDo => "What do you want to do?".to_string(),
            Question::SystemName => "Which system do you want to use?".to_string(),
            Question::SystemVersion(name) => {
                format!("Which version of \"{name}\" do you want to use?")
            }
            Question::ModuleNames => "Which modules do you want to use?".to_string(),
            Question::ModuleVersion(name) => {
                format!("Which version of \"{name}\" do you want to use?")
            }
            Question::HostVersion => "Which Foundry version do you want to start?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Action(Action),
    SystemName(String),
    System(PackageDescriptor),
    ModuleNames(Vec<String>),
    Module(PackageDescriptor),
    HostVersion(String),
    /// Start over from the first question
    Cancel,
}

/// Answers gathered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    action: Option<Action>,
    system_name: Option<String>,
    system: Option<PackageDescriptor>,
    module_names: Option<Vec<String>>,
    modules: Vec<PackageDescriptor>,
    host_version: Option<String>,
}

impl Selection {
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    pub fn system(&self) -> Option<&PackageDescriptor> {
        self.system.as_ref()
    }

    pub fn modules(&self) -> &[PackageDescriptor] {
        &self.modules
    }

    pub fn host_version(&self) -> Option<&str> {
        self.host_version.as_deref()
    }

    #[must_use]
    pub fn apply(mut self, answer: Answer) -> Self {
        match answer {
            Answer::Cancel => return Self::default(),
            Answer::Action(action) => {
                return Self {
                    action: Some(action),
                    ..Self::default()
                };
            }
            Answer::SystemName(name) => {
                self.system_name = Some(name);
                self.system = None;
            }
            Answer::System(descriptor) => self.system = Some(descriptor),
            Answer::ModuleNames(names) => {
                self.module_names = Some(names);
                self.modules.clear();
            }
            Answer::Module(descriptor) => self.modules.push(descriptor),
            Answer::HostVersion(version) => self.host_version = Some(version),
        }
        self
    }
}

/// The next question to ask, or `None` once the selection is complete
pub fn next_question(selection: &Selection) -> Option<Question> {
    let Some(action) = selection.action else {
        return Some(Question::WhatToDo);
    };

    if action.includes_system() {
        match (&selection.system_name, &selection.system) {
            (None, _) => return Some(Question::SystemName),
            (Some(name), None) => return Some(Question::SystemVersion(name.clone())),
            _ => {}
        }
    }

    if action.includes_modules() {
        let Some(names) = &selection.module_names else {
            return Some(Question::ModuleNames);
        };
        if let Some(name) = names.get(selection.modules.len()) {
            return Some(Question::ModuleVersion(name.clone()));
        }
    }

    if action.launches() && selection.host_version.is_none() {
        return Some(Question::HostVersion);
    }

    None
}
