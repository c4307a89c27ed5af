//! Multi-step project deletion
//!
//! Removing a project touches up to three documents: its PDF, its image and
//! the manifest. The store offers no transaction across them, so the delete
//! is an ordered list of idempotent steps. Every step runs even when an
//! earlier one failed, each outcome is recorded, and the failed steps can be
//! turned into a new plan and retried on their own.

use crate::core::FolioError;
use crate::portfolio::project::Project;

/// Kind of file attached to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Pdf => write!(f, "pdf"),
            FileKind::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteStep {
    /// Delete a repository file; already gone counts as done
    RemoveFile { kind: FileKind, path: String },
    /// Drop every manifest entry with this title; no match counts as done
    RemoveFromManifest { title: String },
}

impl std::fmt::Display for DeleteStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteStep::RemoveFile { kind, path } => write!(f, "{} {}", kind, path),
            DeleteStep::RemoveFromManifest { title } => write!(f, "manifest entry '{}'", title),
        }
    }
}

#[derive(Debug)]
pub enum StepStatus {
    Done,
    /// The target was already gone
    AlreadyAbsent,
    Failed(FolioError),
}

#[derive(Debug)]
pub struct StepOutcome {
    pub step: DeleteStep,
    pub status: StepStatus,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, StepStatus::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletePlan {
    steps: Vec<DeleteStep>,
}

impl DeletePlan {
    /// PDF first, then image, then the manifest entry
    pub fn for_project(project: &Project, title_field: &str) -> Self {
        let mut steps = Vec::new();
        if let Some(path) = project.pdf_path() {
            steps.push(DeleteStep::RemoveFile {
                kind: FileKind::Pdf,
                path: path.to_string(),
            });
        }
        if let Some(path) = project.image_path() {
            steps.push(DeleteStep::RemoveFile {
                kind: FileKind::Image,
                path: path.to_string(),
            });
        }
        steps.push(DeleteStep::RemoveFromManifest {
            title: project.title(title_field).unwrap_or_default().to_string(),
        });
        Self { steps }
    }

    pub fn from_steps(steps: Vec<DeleteStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[DeleteStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Per-step result of running a [`DeletePlan`]
#[derive(Debug, Default)]
pub struct DeleteReport {
    outcomes: Vec<StepOutcome>,
}

impl DeleteReport {
    pub fn push(&mut self, step: DeleteStep, status: StepStatus) {
        self.outcomes.push(StepOutcome { step, status });
    }

    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(StepOutcome::is_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// A plan holding only the steps that failed, in their original order
    pub fn retry_plan(&self) -> DeletePlan {
        DeletePlan::from_steps(self.failures().map(|o| o.step.clone()).collect())
    }

    /// `Ok` when every step succeeded, otherwise the first step's error
    pub fn into_result(self) -> Result<(), FolioError> {
        match self.outcomes.into_iter().find_map(|o| match o.status {
            StepStatus::Failed(e) => Some(e),
            _ => None,
        }) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
