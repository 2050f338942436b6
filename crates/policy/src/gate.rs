//! Policy dispatch: `authorize(actor, action, entity type, record?)`.

use serde::{Deserialize, Serialize};

use edupath_auth::Role;
use edupath_core::{
    ActorId, Agent, Branch, Commission, Country, Course, DomainError, DomainResult, Employee,
    Entity, EntityKind, State, Student, StudentDocument, University,
};

use crate::policies::{
    AdminPanelPolicy, AgentPolicy, BranchPolicy, CommissionPolicy, CountryPolicy, CoursePolicy,
    EmployeePolicy, StatePolicy, StatePolicyMode, StudentDocumentPolicy, StudentPolicy,
    UniversityPolicy,
};
use crate::{Action, AdminBypass, Decision, Policy, Subject};

/// Borrowed record of any policy-guarded entity type.
#[derive(Debug, Clone, Copy)]
pub enum RecordRef<'a> {
    Agent(&'a Agent),
    Branch(&'a Branch),
    Commission(&'a Commission),
    Country(&'a Country),
    Course(&'a Course),
    Employee(&'a Employee),
    State(&'a State),
    Student(&'a Student),
    StudentDocument(&'a StudentDocument),
    University(&'a University),
}

impl RecordRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            RecordRef::Agent(_) => EntityKind::Agent,
            RecordRef::Branch(_) => EntityKind::Branch,
            RecordRef::Commission(_) => EntityKind::Commission,
            RecordRef::Country(_) => EntityKind::Country,
            RecordRef::Course(_) => EntityKind::Course,
            RecordRef::Employee(_) => EntityKind::Employee,
            RecordRef::State(_) => EntityKind::State,
            RecordRef::Student(_) => EntityKind::Student,
            RecordRef::StudentDocument(_) => EntityKind::StudentDocument,
            RecordRef::University(_) => EntityKind::University,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            RecordRef::Agent(r) => r.id().into(),
            RecordRef::Branch(r) => r.id().into(),
            RecordRef::Commission(r) => r.id().into(),
            RecordRef::Country(r) => r.id().into(),
            RecordRef::Course(r) => r.id().into(),
            RecordRef::Employee(r) => r.id().into(),
            RecordRef::State(r) => r.id().into(),
            RecordRef::Student(r) => r.id().into(),
            RecordRef::StudentDocument(r) => r.id().into(),
            RecordRef::University(r) => r.id().into(),
        }
    }
}

/// Records that can be handed to the [`Gate`].
pub trait AsRecord: Entity {
    fn as_record(&self) -> RecordRef<'_>;
}

macro_rules! impl_as_record {
    ($($t:ident),* $(,)?) => {
        $(
            impl AsRecord for $t {
                fn as_record(&self) -> RecordRef<'_> {
                    RecordRef::$t(self)
                }
            }
        )*
    };
}

impl_as_record!(
    Agent,
    Branch,
    Commission,
    Country,
    Course,
    Employee,
    State,
    Student,
    StudentDocument,
    University,
);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub state_policy: StatePolicyMode,
}

/// Audit view of one decision.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyExplanation {
    pub actor_id: ActorId,
    pub entity: EntityKind,
    pub action: Action,
    pub record_id: Option<i64>,
    /// Role whose rule applied (`None` for the bypass or when nothing applied).
    pub governing_role: Option<Role>,
    pub granted: bool,
    pub reason: String,
}

/// Holds one bypass-wrapped policy per entity type and dispatches to it.
#[derive(Debug)]
pub struct Gate {
    agents: AdminBypass<AgentPolicy>,
    branches: AdminBypass<BranchPolicy>,
    commissions: AdminBypass<CommissionPolicy>,
    countries: AdminBypass<CountryPolicy>,
    courses: AdminBypass<CoursePolicy>,
    employees: AdminBypass<EmployeePolicy>,
    states: AdminBypass<StatePolicy>,
    students: AdminBypass<StudentPolicy>,
    documents: AdminBypass<StudentDocumentPolicy>,
    universities: AdminBypass<UniversityPolicy>,
    panel: AdminBypass<AdminPanelPolicy>,
}

impl Default for Gate {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

fn mismatch(expected: EntityKind, actual: EntityKind) -> DomainError {
    DomainError::configuration(format!(
        "record of type '{actual}' passed to the '{expected}' policy"
    ))
}

macro_rules! typed_record {
    ($record:expr, $variant:ident, $kind:expr) => {
        match $record {
            None => None,
            Some(RecordRef::$variant(r)) => Some(r),
            Some(other) => return Err(mismatch($kind, other.kind())),
        }
    };
}

impl Gate {
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            agents: AdminBypass::new(AgentPolicy),
            branches: AdminBypass::new(BranchPolicy),
            commissions: AdminBypass::new(CommissionPolicy),
            countries: AdminBypass::new(CountryPolicy::new()),
            courses: AdminBypass::new(CoursePolicy::new()),
            employees: AdminBypass::new(EmployeePolicy),
            states: AdminBypass::new(StatePolicy::new(config.state_policy)),
            students: AdminBypass::new(StudentPolicy),
            documents: AdminBypass::new(StudentDocumentPolicy),
            universities: AdminBypass::new(UniversityPolicy::new()),
            panel: AdminBypass::new(AdminPanelPolicy),
        }
    }

    /// Full decision for `action` on `entity`, optionally about one record.
    pub fn decide(
        &self,
        subject: &Subject<'_>,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> DomainResult<Decision> {
        let decision = match entity {
            EntityKind::Agent => {
                let r = typed_record!(record, Agent, entity);
                self.agents.check(subject, action, r)
            }
            EntityKind::Branch => {
                let r = typed_record!(record, Branch, entity);
                self.branches.check(subject, action, r)
            }
            EntityKind::Commission => {
                let r = typed_record!(record, Commission, entity);
                self.commissions.check(subject, action, r)
            }
            EntityKind::Country => {
                let r = typed_record!(record, Country, entity);
                self.countries.check(subject, action, r)
            }
            EntityKind::Course => {
                let r = typed_record!(record, Course, entity);
                self.courses.check(subject, action, r)
            }
            EntityKind::Employee => {
                let r = typed_record!(record, Employee, entity);
                self.employees.check(subject, action, r)
            }
            EntityKind::State => {
                let r = typed_record!(record, State, entity);
                self.states.check(subject, action, r)
            }
            EntityKind::Student => {
                let r = typed_record!(record, Student, entity);
                self.students.check(subject, action, r)
            }
            EntityKind::StudentDocument => {
                let r = typed_record!(record, StudentDocument, entity);
                self.documents.check(subject, action, r)
            }
            EntityKind::University => {
                let r = typed_record!(record, University, entity);
                self.universities.check(subject, action, r)
            }
            EntityKind::AdminPanel => {
                if let Some(other) = record {
                    return Err(mismatch(entity, other.kind()));
                }
                self.panel.check(subject, action, None)
            }
        }?;

        tracing::debug!(
            actor = %subject.profile().actor_id,
            %entity,
            %action,
            record = ?record.map(|r| r.id()),
            granted = decision.granted,
            reason = %decision.reason,
            "policy decision"
        );
        Ok(decision)
    }

    /// Strict yes/no for `action` on `entity`.
    pub fn authorize(
        &self,
        subject: &Subject<'_>,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> DomainResult<bool> {
        Ok(self.decide(subject, action, entity, record)?.granted)
    }

    /// Typed convenience over [`Gate::authorize`].
    pub fn allows<R: AsRecord>(
        &self,
        subject: &Subject<'_>,
        action: Action,
        record: Option<&R>,
    ) -> DomainResult<bool> {
        self.authorize(subject, action, R::KIND, record.map(AsRecord::as_record))
    }

    /// Admin panel gate.
    pub fn can_access_panel(&self, subject: &Subject<'_>) -> bool {
        self.panel
            .check(subject, Action::AccessPanel, None)
            .is_ok_and(|d| d.granted)
    }

    /// Explain why a decision comes out the way it does.
    pub fn explain(
        &self,
        subject: &Subject<'_>,
        action: Action,
        entity: EntityKind,
        record: Option<RecordRef<'_>>,
    ) -> DomainResult<PolicyExplanation> {
        let decision = self.decide(subject, action, entity, record)?;
        let profile = subject.profile();
        let governing_role = if profile.is_super_admin() {
            None
        } else {
            profile.scoped_role().map(|r| r.role())
        };
        Ok(PolicyExplanation {
            actor_id: profile.actor_id,
            entity,
            action,
            record_id: record.map(|r| r.id()),
            governing_role,
            granted: decision.granted,
            reason: decision.reason.into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use edupath_auth::{
        ActorProfile, AgentLink, EmployeeLink, NoGrants, Permission, PermissionGrants,
        StudentLink,
    };
    use edupath_core::{
        AgentId, BranchId, CommissionId, CountryId, CourseId, DocumentId, EmployeeId, StateId,
        StudentId, UniversityId,
    };

    use super::*;

    struct Grants(HashSet<Permission>);

    impl PermissionGrants for Grants {
        fn is_granted(&self, _actor: ActorId, permission: Permission) -> bool {
            self.0.contains(&permission)
        }
    }

    fn grants(perms: &[Permission]) -> Grants {
        Grants(perms.iter().copied().collect())
    }

    fn branch_admin(branch: i64) -> ActorProfile {
        ActorProfile::new(ActorId::new())
            .with_role(Role::BranchAdmin)
            .with_employee(EmployeeLink {
                id: EmployeeId::new(50),
                branch_id: Some(BranchId::new(branch)),
            })
    }

    fn employee(id: i64, branch: i64) -> ActorProfile {
        ActorProfile::new(ActorId::new())
            .with_role(Role::Employee)
            .with_employee(EmployeeLink {
                id: EmployeeId::new(id),
                branch_id: Some(BranchId::new(branch)),
            })
    }

    fn agent_actor(id: i64, branch: i64) -> ActorProfile {
        ActorProfile::new(ActorId::new())
            .with_role(Role::Agent)
            .with_agent(AgentLink {
                id: AgentId::new(id),
                branch_id: Some(BranchId::new(branch)),
                parent_agent_id: None,
            })
    }

    fn student_actor(id: i64) -> ActorProfile {
        ActorProfile::new(ActorId::new())
            .with_role(Role::Student)
            .with_student(StudentLink {
                id: StudentId::new(id),
                branch_id: Some(BranchId::new(1)),
                agent_id: None,
            })
    }

    fn agent(id: i64, branch: i64, parent: Option<i64>) -> Agent {
        Agent {
            id: AgentId::new(id),
            actor_id: ActorId::new(),
            branch_id: Some(BranchId::new(branch)),
            parent_agent_id: parent.map(AgentId::new),
            name: format!("agent-{id}"),
        }
    }

    fn student(id: i64, branch: i64, agent: Option<i64>) -> Student {
        Student {
            id: StudentId::new(id),
            actor_id: None,
            branch_id: Some(BranchId::new(branch)),
            agent_id: agent.map(AgentId::new),
            name: format!("student-{id}"),
        }
    }

    fn commission(branch: i64, agent: i64) -> Commission {
        Commission {
            id: CommissionId::new(1),
            branch_id: Some(BranchId::new(branch)),
            agent_id: Some(AgentId::new(agent)),
            amount_cents: 125_00,
        }
    }

    fn staff_employee(id: i64, branch: i64) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            actor_id: ActorId::new(),
            branch_id: Some(BranchId::new(branch)),
            name: format!("employee-{id}"),
        }
    }

    fn allows<R: AsRecord>(profile: &ActorProfile, action: Action, record: Option<&R>) -> bool {
        Gate::default()
            .allows(&Subject::new(profile, &NoGrants), action, record)
            .unwrap()
    }

    #[test]
    fn super_admin_allowed_everything_without_record() {
        let profile = ActorProfile::new(ActorId::new()).with_role(Role::SuperAdmin);
        let subject = Subject::new(&profile, &NoGrants);
        let gate = Gate::default();
        for entity in [EntityKind::Agent, EntityKind::State, EntityKind::StudentDocument, EntityKind::AdminPanel] {
            for action in Action::ALL {
                assert!(gate.authorize(&subject, action, entity, None).unwrap());
            }
        }
        assert!(gate.can_access_panel(&subject));
    }

    #[test]
    fn missing_record_is_a_configuration_error() {
        let profile = branch_admin(1);
        let err = Gate::default()
            .allows::<Student>(&Subject::new(&profile, &NoGrants), Action::Update, None)
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn mismatched_record_type_is_a_configuration_error() {
        let profile = branch_admin(1);
        let s = student(1, 1, None);
        let err = Gate::default()
            .authorize(
                &Subject::new(&profile, &NoGrants),
                Action::View,
                EntityKind::Agent,
                Some(s.as_record()),
            )
            .unwrap_err();
        assert!(err.is_defect());
    }

    #[test]
    fn undefined_action_is_a_configuration_error() {
        let profile = branch_admin(1);
        let a = agent(1, 1, None);
        let result = Gate::default().allows(&Subject::new(&profile, &NoGrants), Action::Verify, Some(&a));
        assert!(result.is_err());
    }

    #[test]
    fn agent_policy_rules() {
        let me = agent_actor(7, 3);
        assert!(allows(&me, Action::View, Some(&agent(7, 3, None))));
        assert!(allows(&me, Action::View, Some(&agent(8, 9, Some(7)))));
        assert!(!allows(&me, Action::Update, Some(&agent(8, 9, Some(7)))));
        assert!(!allows(&me, Action::View, Some(&agent(9, 3, Some(8)))));
        assert!(allows(&me, Action::Update, Some(&agent(7, 3, None))));

        let admin = branch_admin(3);
        assert!(allows(&admin, Action::Delete, Some(&agent(9, 3, None))));
        assert!(!allows(&admin, Action::Delete, Some(&agent(9, 4, None))));
        assert!(!allows(&admin, Action::Restore, Some(&agent(9, 3, None))));
    }

    #[test]
    fn create_actions_key_off_permission_grants() {
        let profile = branch_admin(1);
        let gate = Gate::default();
        let none = Subject::new(&profile, &NoGrants);
        let granted_store = grants(&[Permission::ManageAgents, Permission::ManageStudents]);
        let granted = Subject::new(&profile, &granted_store);

        assert!(!gate.allows::<Agent>(&none, Action::Create, None).unwrap());
        assert!(gate.allows::<Agent>(&granted, Action::Create, None).unwrap());
        assert!(gate.allows::<Student>(&granted, Action::Create, None).unwrap());
        assert!(!gate.allows::<Branch>(&granted, Action::Create, None).unwrap());
        assert!(!gate.allows::<Employee>(&granted, Action::Create, None).unwrap());
    }

    #[test]
    fn branch_policy_is_read_only_for_agents_and_employees() {
        let own = Branch { id: BranchId::new(3), name: "Lahore".into() };
        let other = Branch { id: BranchId::new(4), name: "Dubai".into() };

        for profile in [agent_actor(7, 3), employee(1, 3)] {
            assert!(allows(&profile, Action::View, Some(&own)));
            assert!(!allows(&profile, Action::View, Some(&other)));
            assert!(!allows(&profile, Action::Update, Some(&own)));
            assert!(!allows(&profile, Action::Delete, Some(&own)));
        }
        assert!(allows(&branch_admin(3), Action::Update, Some(&own)));
        assert!(!allows(&branch_admin(3), Action::Update, Some(&other)));
        assert!(!allows(&student_actor(1), Action::View, Some(&own)));
    }

    #[test]
    fn commission_policy_rules() {
        let me = agent_actor(7, 3);
        assert!(allows(&me, Action::View, Some(&commission(9, 7))));
        assert!(allows(&me, Action::Update, Some(&commission(9, 7))));
        assert!(!allows(&me, Action::Delete, Some(&commission(9, 7))));
        assert!(!allows(&me, Action::View, Some(&commission(3, 8))));

        assert!(allows(&branch_admin(3), Action::Delete, Some(&commission(3, 8))));
        assert!(allows(&employee(1, 3), Action::View, Some(&commission(3, 8))));
        assert!(!allows(&employee(1, 3), Action::View, Some(&commission(4, 8))));
        assert!(!allows(&student_actor(1), Action::View, Some(&commission(3, 8))));
    }

    #[test]
    fn employee_policy_rules() {
        let me = employee(11, 3);
        assert!(allows(&me, Action::View, Some(&staff_employee(12, 3))));
        assert!(!allows(&me, Action::View, Some(&staff_employee(12, 4))));
        assert!(allows(&me, Action::Update, Some(&staff_employee(11, 3))));
        assert!(!allows(&me, Action::Update, Some(&staff_employee(12, 3))));
        assert!(!allows(&me, Action::Delete, Some(&staff_employee(11, 3))));

        let admin = branch_admin(3);
        assert!(allows(&admin, Action::Update, Some(&staff_employee(12, 3))));
        assert!(allows(&admin, Action::Delete, Some(&staff_employee(12, 3))));
        assert!(!allows(&admin, Action::Delete, Some(&staff_employee(12, 4))));
    }

    #[test]
    fn student_policy_rules() {
        let recruiter = agent_actor(7, 3);
        assert!(allows(&recruiter, Action::View, Some(&student(1, 9, Some(7)))));
        assert!(allows(&recruiter, Action::Update, Some(&student(1, 9, Some(7)))));
        assert!(!allows(&recruiter, Action::View, Some(&student(2, 3, Some(8)))));

        let staff = employee(1, 3);
        assert!(allows(&staff, Action::View, Some(&student(2, 3, Some(8)))));
        assert!(!allows(&staff, Action::Update, Some(&student(2, 3, Some(8)))));
        assert!(!allows(&staff, Action::Delete, Some(&student(2, 3, Some(8)))));

        let me = student_actor(5);
        assert!(allows(&me, Action::View, Some(&student(5, 1, None))));
        assert!(!allows(&me, Action::View, Some(&student(6, 1, None))));
        assert!(!allows(&me, Action::Update, Some(&student(5, 1, None))));
    }

    #[test]
    fn reference_data_is_read_only_for_linked_profiles() {
        let course = Course { id: CourseId::new(1), university_id: UniversityId::new(1), name: "MSc".into() };
        let uni = University { id: UniversityId::new(1), country_id: None, name: "UoT".into() };
        let country = Country { id: CountryId::new(1), name: "Canada".into() };

        // A linked profile without any role still reads reference data.
        let linked = ActorProfile::new(ActorId::new()).with_student(StudentLink {
            id: StudentId::new(1),
            branch_id: None,
            agent_id: None,
        });
        let nobody = ActorProfile::new(ActorId::new()).with_role(Role::BranchAdmin);

        assert!(allows(&linked, Action::View, Some(&course)));
        assert!(allows(&linked, Action::View, Some(&uni)));
        assert!(allows(&linked, Action::View, Some(&country)));
        assert!(allows::<Course>(&linked, Action::ViewAny, None));
        assert!(!allows(&linked, Action::Update, Some(&course)));
        assert!(!allows::<University>(&linked, Action::Create, None));
        assert!(!allows(&nobody, Action::View, Some(&course)));
    }

    #[test]
    fn state_policy_follows_configured_mode() {
        let state = State { id: StateId::new(1), country_id: CountryId::new(1), name: "Ontario".into() };
        let profile = agent_actor(7, 3);
        let subject = Subject::new(&profile, &NoGrants);

        let permissive = Gate::new(PolicyConfig { state_policy: StatePolicyMode::Permissive });
        assert!(permissive.allows(&subject, Action::Delete, Some(&state)).unwrap());
        assert!(permissive.allows::<State>(&subject, Action::Create, None).unwrap());

        let read_only = Gate::new(PolicyConfig { state_policy: StatePolicyMode::ReadOnly });
        assert!(read_only.allows(&subject, Action::View, Some(&state)).unwrap());
        assert!(!read_only.allows(&subject, Action::Update, Some(&state)).unwrap());

        let unlinked = ActorProfile::new(ActorId::new()).with_role(Role::Agent);
        let unlinked_subject = Subject::new(&unlinked, &NoGrants);
        assert!(!permissive.allows(&unlinked_subject, Action::View, Some(&state)).unwrap());
    }

    #[test]
    fn student_document_rules() {
        let doc = StudentDocument {
            id: DocumentId::new(1),
            student_id: StudentId::new(5),
            kind: "passport".into(),
            verified: false,
        };
        let gate = Gate::default();

        let owner = student_actor(5);
        let owner_subject = Subject::new(&owner, &NoGrants);
        for action in [Action::View, Action::Update, Action::Download] {
            assert!(gate.allows(&owner_subject, action, Some(&doc)).unwrap());
        }
        assert!(!gate.allows(&owner_subject, Action::Delete, Some(&doc)).unwrap());
        assert!(!gate.allows(&owner_subject, Action::Verify, Some(&doc)).unwrap());

        let staff = ActorProfile::new(ActorId::new()).with_role(Role::Staff);
        let staff_grants = grants(&[Permission::VerifyStudentDocuments, Permission::RestoreStudentDocuments]);
        let staff_subject = Subject::new(&staff, &staff_grants);
        assert!(gate.allows(&staff_subject, Action::Verify, Some(&doc)).unwrap());
        assert!(!gate.allows(&staff_subject, Action::View, Some(&doc)).unwrap());
        assert!(!gate.allows(&staff_subject, Action::Restore, Some(&doc)).unwrap());

        let admin = ActorProfile::new(ActorId::new()).with_role(Role::Admin);
        let admin_grants = grants(&[Permission::RestoreStudentDocuments]);
        let admin_subject = Subject::new(&admin, &admin_grants);
        assert!(gate.allows(&admin_subject, Action::Restore, Some(&doc)).unwrap());
        assert!(!gate.allows(&admin_subject, Action::ForceDelete, Some(&doc)).unwrap());

        let stranger = student_actor(6);
        assert!(!gate.allows(&Subject::new(&stranger, &NoGrants), Action::Download, Some(&doc)).unwrap());
    }

    #[test]
    fn admin_panel_is_super_admin_only() {
        let gate = Gate::default();
        let admin = ActorProfile::new(ActorId::new()).with_role(Role::Admin);
        assert!(!gate.can_access_panel(&Subject::new(&admin, &NoGrants)));
        assert!(!gate.can_access_panel(&Subject::new(&branch_admin(1), &NoGrants)));
    }

    #[test]
    fn no_recognized_role_or_profile_denies() {
        let nobody = ActorProfile::new(ActorId::new());
        assert!(!allows(&nobody, Action::View, Some(&student(1, 1, None))));
        assert!(!allows::<Student>(&nobody, Action::ViewAny, None));
        assert!(!allows(&nobody, Action::View, Some(&agent(1, 1, None))));
    }

    #[test]
    fn explanation_names_governing_role_and_reason() {
        let profile = ActorProfile::new(ActorId::new())
            .with_role(Role::BranchAdmin)
            .with_role(Role::Agent)
            .with_employee(EmployeeLink { id: EmployeeId::new(1), branch_id: Some(BranchId::new(5)) })
            .with_agent(AgentLink { id: AgentId::new(9), branch_id: Some(BranchId::new(5)), parent_agent_id: None });
        let s = student(1, 6, Some(9));

        let explanation = Gate::default()
            .explain(&Subject::new(&profile, &NoGrants), Action::View, EntityKind::Student, Some(s.as_record()))
            .unwrap();
        assert_eq!(explanation.governing_role, Some(Role::BranchAdmin));
        assert!(!explanation.granted);
        assert_eq!(explanation.record_id, Some(1));

        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["entity"], "student");
        assert_eq!(json["action"], "view");
    }
}
