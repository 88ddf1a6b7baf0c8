//! Form behaviour against in-memory oracles. Nothing here reaches a backend.

use campus_check::{AvailabilityChecker, CheckOutcome, CheckerConfig, SubmitGate};
use campus_client::{
    BranchForm, ClientConfig, ClientError, CourseForm, DepartmentForm, NotificationLevel,
    NotificationLog, RegisterInstitutionForm, RegisterStep, RestClient, SessionContext,
};
use campus_core::{
    CodeScope, ComponentKind, Department, DepartmentId, EntityKind, EvaluationScheme,
    InstitutionType, ValidationError,
};
use campus_test_utils::fixtures::{department_id, institution_id};
use campus_test_utils::StaticOracle;
use std::sync::Arc;

type Oracle = Arc<StaticOracle<CodeScope>>;

fn checker(oracle: &Oracle, kind: EntityKind) -> AvailabilityChecker<CodeScope, Oracle> {
    AvailabilityChecker::new(Arc::clone(oracle), CheckerConfig::for_kind(kind))
}

fn offline_client() -> RestClient {
    RestClient::new(&ClientConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        request_timeout_ms: 500,
        min_code_len: 2,
        log_filter: None,
    })
    .unwrap()
}

async fn settle(outcome: Option<CheckOutcome>) {
    if let Some(outcome) = outcome {
        outcome.settled().await;
    }
}

fn filled_registration(oracle: &Oracle) -> RegisterInstitutionForm<Oracle> {
    let mut form = RegisterInstitutionForm::new(checker(oracle, EntityKind::Institution));
    form.name = "Northfield College".into();
    form.address = "12 College Road".into();
    form.established_year = "1962".into();
    form.institution_type = Some(InstitutionType::College);
    form
}

// ============================================================================
// REGISTRATION
// ============================================================================

#[tokio::test]
async fn registration_walks_three_steps() {
    let oracle: Oracle = Arc::new(StaticOracle::new(["TAKEN"]));
    let mut form = filled_registration(&oracle);

    let pending = form.set_code("nfc");
    assert_eq!(form.code(), "NFC");
    assert_eq!(
        form.next_step(),
        Err(ValidationError::CodeCheckIncomplete {
            kind: EntityKind::Institution
        })
    );
    settle(pending).await;
    assert_eq!(form.submit_gate(), SubmitGate::Open);
    assert_eq!(form.next_step(), Ok(RegisterStep::Contact));

    form.contact_email = "admin@northfield.edu".into();
    form.contact_phone = "12345".into();
    assert_eq!(
        form.next_step().unwrap_err().to_string(),
        "Enter a valid 10-digit phone number"
    );
    form.contact_phone = "9876543210".into();
    assert_eq!(form.next_step(), Ok(RegisterStep::Credentials));

    form.password = "abc".into();
    assert!(form.to_request().is_err());
    form.password = "secret1".into();
    let request = form.to_request().unwrap();
    assert_eq!(request.code, "NFC");
    assert_eq!(request.established_year, 1962);
    assert_eq!(request.institution_type, InstitutionType::College);

    assert_eq!(form.previous_step(), RegisterStep::Contact);
    assert_eq!(form.step().number(), 2);
}

#[tokio::test]
async fn registration_blocks_taken_code() {
    let oracle: Oracle = Arc::new(StaticOracle::new(["NFC"]));
    let mut form = filled_registration(&oracle);

    settle(form.set_code(" nfc ")).await;
    assert!(form.code_flags().exists);
    assert_eq!(
        form.next_step().unwrap_err().to_string(),
        "Institution code already exists"
    );
    assert_eq!(form.step(), RegisterStep::Details);
}

#[tokio::test]
async fn registration_requires_confirmed_code_after_failure() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    oracle.set_failing(true);
    let mut form = filled_registration(&oracle);

    settle(form.set_code("NFC")).await;
    assert_eq!(form.submit_gate(), SubmitGate::Unconfirmed);
    assert_eq!(
        form.next_step().unwrap_err().to_string(),
        "Please wait for institution code validation"
    );

    oracle.set_failing(false);
    settle(form.blur_code()).await;
    assert_eq!(form.submit_gate(), SubmitGate::Open);
    assert_eq!(oracle.call_count(), 2);
}

#[tokio::test]
async fn registration_rejects_future_year() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = filled_registration(&oracle);
    form.established_year = "9999".into();

    settle(form.set_code("NFC")).await;
    assert_eq!(
        form.validate_step(RegisterStep::Details)
            .unwrap_err()
            .to_string(),
        "Enter a valid established year"
    );
}

// ============================================================================
// DEPARTMENTS AND BRANCHES
// ============================================================================

fn mech() -> Department {
    Department {
        id: department_id(7),
        institution_id: Some(institution_id()),
        name: "Mechanical Engineering".into(),
        code: "Mech".into(),
        contact_email: Some("mech@northfield.edu".into()),
        head_of_department: None,
    }
}

#[tokio::test]
async fn department_edit_keeps_own_code() {
    let oracle: Oracle = Arc::new(StaticOracle::new(["Mech", "Civil"]));
    let mut form = DepartmentForm::for_edit(
        checker(&oracle, EntityKind::Department),
        institution_id(),
        &mech(),
    );

    assert!(form.is_editing());
    assert_eq!(form.code(), "Mech");
    assert_eq!(form.submit_gate(), SubmitGate::Open);
    assert!(form.code_flags().checked);
    assert_eq!(oracle.call_count(), 0);

    settle(form.set_code("Civil")).await;
    assert_eq!(
        form.to_update_request(),
        Err(ValidationError::CodeTaken {
            kind: EntityKind::Department
        })
    );

    assert!(matches!(form.set_code(" Mech "), Some(CheckOutcome::OwnCode)));
    let request = form.to_update_request().unwrap();
    assert_eq!(request.code, "Mech");
    assert_eq!(request.contact_email, "mech@northfield.edu");
}

#[tokio::test]
async fn department_codes_are_case_sensitive() {
    let oracle: Oracle = Arc::new(StaticOracle::new(["Mech"]));
    let mut form = DepartmentForm::new(checker(&oracle, EntityKind::Department), institution_id());

    settle(form.set_code("mech")).await;
    assert_eq!(form.submit_gate(), SubmitGate::Open);
    assert_eq!(oracle.seen()[0].1, "mech");
}

#[tokio::test]
async fn department_submits_the_code_that_was_checked() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let checker = AvailabilityChecker::new(Arc::clone(&oracle), CheckerConfig::default());
    let mut form = DepartmentForm::new(checker, institution_id());
    form.name = "Mechanical Engineering".into();
    form.contact_email = "mech@northfield.edu".into();

    settle(form.set_code(" Mech ")).await;
    let request = form.to_request().unwrap();
    assert_eq!(request.code, oracle.seen()[0].1);
    assert_eq!(request.code, form.code());
}

#[tokio::test]
async fn department_submit_reports_missing_fields() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = DepartmentForm::new(checker(&oracle, EntityKind::Department), institution_id());
    let log = NotificationLog::new();

    let err = form.submit(&offline_client(), &log).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    let last = log.last().unwrap();
    assert_eq!(last.level, NotificationLevel::Warning);
    assert_eq!(last.message, "All fields are required");
}

#[tokio::test]
async fn branch_requires_department() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = BranchForm::new(checker(&oracle, EntityKind::Branch), institution_id());
    form.name = "Computer Science A".into();

    settle(form.set_code("csea")).await;
    let err = form.to_request().unwrap_err();
    assert_eq!(err.field(), "departmentId");

    form.department_id = Some(department_id(1));
    let request = form.to_request().unwrap();
    assert_eq!(request.code, "CSEA");
    assert_eq!(
        oracle.seen()[0].0,
        CodeScope::Branch {
            institution_id: institution_id()
        }
    );
}

#[tokio::test]
async fn branch_blocks_while_checking() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = BranchForm::new(checker(&oracle, EntityKind::Branch), institution_id());
    form.name = "Computer Science A".into();
    form.department_id = Some(department_id(1));

    let pending = form.set_code(" csea ");
    assert_eq!(form.code(), "CSEA");
    assert_eq!(form.submit_gate(), SubmitGate::Checking);
    assert_eq!(
        form.to_request().unwrap_err().to_string(),
        "Please wait for branch code validation"
    );
    settle(pending).await;
    assert!(form.to_request().is_ok());
}

// ============================================================================
// COURSES
// ============================================================================

fn course_form(oracle: &Oracle) -> CourseForm<Oracle> {
    let mut form = CourseForm::new(checker(oracle, EntityKind::Course));
    form.name = "Linear Algebra".into();
    form.credits = "4".into();
    form.semester = "3".into();
    form.evaluation_scheme = Some(EvaluationScheme::MidEnd);
    let mid = form.add_component(ComponentKind::Theory);
    form.components[mid].name = "mid".into();
    form.components[mid].max_marks = "30".into();
    form.components[mid].weightage = "40".into();
    let end = form.add_component(ComponentKind::Theory);
    form.components[end].name = "end".into();
    form.components[end].max_marks = "70".into();
    form.components[end].weightage = "60".into();
    form
}

#[tokio::test]
async fn course_code_waits_for_department() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = course_form(&oracle);

    assert!(form.set_code("ma201").is_none());
    assert_eq!(form.code_flags(), Default::default());

    settle(form.select_department(Some(department_id(1)))).await;
    settle(form.select_department(Some(department_id(2)))).await;

    let scopes: Vec<DepartmentId> = oracle
        .seen()
        .into_iter()
        .map(|(scope, _)| match scope {
            CodeScope::Course { department_id } => department_id,
            other => panic!("unexpected scope {other:?}"),
        })
        .collect();
    assert_eq!(scopes, vec![department_id(1), department_id(2)]);

    let request = form.to_request().unwrap();
    assert_eq!(request.code, "MA201");
    assert_eq!(request.department_id, department_id(2));
    assert_eq!(request.components[0].name, "MID");
}

#[tokio::test]
async fn course_validation_messages() {
    let oracle: Oracle = Arc::new(StaticOracle::empty());
    let mut form = course_form(&oracle);
    settle(form.select_department(Some(department_id(1)))).await;
    settle(form.set_code("MA201")).await;

    form.evaluation_scheme = None;
    assert_eq!(
        form.to_request().unwrap_err().to_string(),
        "Select evaluation scheme"
    );
    form.evaluation_scheme = Some(EvaluationScheme::CtEnd);

    form.credits = "-2".into();
    assert_eq!(
        form.to_request().unwrap_err().to_string(),
        "Credits must be a valid non-negative number"
    );
    form.credits = "4".into();

    form.components[1].weightage = "50".into();
    assert_eq!(
        form.to_request().unwrap_err().to_string(),
        "Total weightage must be exactly 100%"
    );

    assert!(form.remove_component(5).is_none());
    assert!(form.remove_component(1).is_some());
    form.components[0].weightage = "100".into();
    assert!(form.to_request().is_ok());
}

#[tokio::test]
async fn course_reset_clears_department() {
    let oracle: Oracle = Arc::new(StaticOracle::new(["MA201"]));
    let mut form = course_form(&oracle);
    settle(form.select_department(Some(department_id(1)))).await;
    settle(form.set_code("MA201")).await;
    assert_eq!(form.submit_gate(), SubmitGate::Taken);

    form.reset();
    assert!(form.department_id().is_none());
    assert_eq!(form.code(), "");
    assert_eq!(form.submit_gate(), SubmitGate::Open);
    assert!(form.components.is_empty());
}

// ============================================================================
// SESSION
// ============================================================================

#[tokio::test]
async fn session_without_backend_is_checked_but_signed_out() {
    let client = offline_client();
    let mut session = SessionContext::init(&client).await;
    assert!(session.auth_checked());
    assert!(!session.is_authenticated());

    session.login(campus_test_utils::fixtures::institution());
    assert!(session.is_authenticated());

    assert!(session.teardown(&client).await.is_err());
    assert!(!session.is_authenticated());
    assert!(session.auth_checked());
}
