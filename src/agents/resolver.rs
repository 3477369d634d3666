use crate::agents::{AzurePipelines, BuildAgent, LocalBuild};
use crate::config::Config;
use crate::environment::Environment;
use std::sync::Arc;

/// Ordered registry of build agents
///
/// Agents are checked with [BuildAgent::detect] in registration order; the
/// fallback is returned when none match.
pub struct BuildAgentResolver {
    agents: Vec<Box<dyn BuildAgent>>,
    fallback: Box<dyn BuildAgent>,
}

impl BuildAgentResolver {
    /// Registry of every supported provider, with [LocalBuild] as fallback
    pub fn new(environment: Arc<dyn Environment>, config: &Config) -> Self {
        let namespace = config.agent.namespace.clone();
        let azure = AzurePipelines::with_namespace(environment, namespace);
        let agents: Vec<Box<dyn BuildAgent>> = vec![Box::new(azure)];

        Self::with_agents(agents, Box::new(LocalBuild::new()))
    }

    pub fn with_agents(agents: Vec<Box<dyn BuildAgent>>, fallback: Box<dyn BuildAgent>) -> Self {
        BuildAgentResolver { agents, fallback }
    }

    /// Agents in detection order, excluding the fallback
    pub fn agents(&self) -> impl Iterator<Item = &dyn BuildAgent> {
        self.agents.iter().map(|agent| agent.as_ref())
    }

    /// The first agent that detects its provider, or the fallback
    pub fn resolve(&self) -> &dyn BuildAgent {
        for agent in &self.agents {
            if agent.detect() {
                tracing::debug!("Detected build agent '{}'", agent.name());
                return agent.as_ref();
            }
            tracing::debug!("Build agent '{}' not detected", agent.name());
        }

        let fallback = self.fallback.name();
        tracing::debug!("No CI provider detected, using '{}'", fallback);
        self.fallback.as_ref()
    }
}
