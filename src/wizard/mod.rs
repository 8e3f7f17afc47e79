pub mod assemble;
pub mod controller;
pub mod navigation;
pub mod screens;
pub mod session;

pub use assemble::{assemble_prompt, AssembledPrompt, OutputBlock};
pub use controller::{WizardController, WizardEffect, COPY_CONFIRMATION, OUTPUT_SCROLL_STEP};
pub use navigation::{parse_scripted_wizard_keys, wizard_action_from_key, WizardAction};
pub use screens::{project_wizard_view_model, WizardBody, WizardViewModel};
pub use session::{SessionState, WizardNavError, WizardStep};
