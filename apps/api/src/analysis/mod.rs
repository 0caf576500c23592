// Analysis layer: every AI-backed operation goes through `AnalysisService`,
// which tries the remote provider first and the rule-based provider second.

pub mod github;
pub mod handlers;
pub mod prompts;
pub mod provider;
pub mod remote;
pub mod rule_based;
pub mod service;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;
