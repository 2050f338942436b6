use edupath_auth::{Permission, ScopedRole};
use edupath_core::{Agent, DomainResult, EntityKind};

use crate::policy::{require, same_branch, unsupported};
use crate::{Action, Decision, Policy, Subject};

/// Agents: branch admins manage their branch's agents, an agent manages itself.
///
/// `view` is deliberately wider than the agent list scope: an agent may also
/// open its direct sub-agents (one level only).
#[derive(Debug, Default, Clone, Copy)]
pub struct AgentPolicy;

impl Policy for AgentPolicy {
    type Record = Agent;

    const ENTITY: EntityKind = EntityKind::Agent;

    fn check(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&Agent>,
    ) -> DomainResult<Decision> {
        let role = subject.scoped_role();
        let decision = match action {
            Action::ViewAny => Decision::when(
                matches!(
                    role,
                    Some(ScopedRole::BranchAdmin(_) | ScopedRole::Agent(_) | ScopedRole::Employee(_))
                ),
                "actor has an agent-visible role",
                "actor has no agent-visible role",
            ),
            Action::View => {
                let agent = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e) | ScopedRole::Employee(e)) => Decision::when(
                        same_branch(agent.branch_id, e.branch_id),
                        "agent belongs to actor's branch",
                        "agent belongs to another branch",
                    ),
                    Some(ScopedRole::Agent(own)) if agent.id == own.id => {
                        Decision::allow("agent is the actor")
                    }
                    Some(ScopedRole::Agent(own)) => Decision::when(
                        agent.parent_agent_id == Some(own.id),
                        "agent is a direct sub-agent of the actor",
                        "agent is neither the actor nor a direct sub-agent",
                    ),
                    _ => Decision::deny("no rule grants viewing agents"),
                }
            }
            Action::Update | Action::Delete => {
                let agent = require(Self::ENTITY, action, record)?;
                match role {
                    Some(ScopedRole::BranchAdmin(e)) => Decision::when(
                        same_branch(agent.branch_id, e.branch_id),
                        "agent belongs to actor's branch",
                        "agent belongs to another branch",
                    ),
                    Some(ScopedRole::Agent(own)) => Decision::when(
                        agent.id == own.id,
                        "agent is the actor",
                        "agents may only change their own record",
                    ),
                    _ => Decision::deny("no rule grants changing agents"),
                }
            }
            Action::Create => Decision::when(
                subject.has_permission(Permission::ManageAgents),
                "actor holds manage_agents",
                "actor lacks manage_agents",
            ),
            Action::Restore | Action::ForceDelete => {
                require(Self::ENTITY, action, record)?;
                Decision::deny("only super admins restore or purge agents")
            }
            Action::Verify | Action::Download | Action::AccessPanel => {
                return Err(unsupported(Self::ENTITY, action));
            }
        };
        Ok(decision)
    }
}
