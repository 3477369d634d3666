// tests/azure_pipelines_test.rs
use std::sync::Arc;

use ci_version::agents::{AzurePipelines, BuildAgent, BuildAgentResolver};
use ci_version::config::Config;
use ci_version::environment::MockEnvironment;
use ci_version::VersionVariables;

fn azure(vars: &[(&str, &str)]) -> AzurePipelines {
    let mut env = MockEnvironment::new().with_variable("TF_BUILD", "True");
    for (name, value) in vars {
        env.set_variable(*name, *value);
    }
    AzurePipelines::new(Arc::new(env))
}

fn with_build_number(build_number: &str) -> AzurePipelines {
    azure(&[("BUILD_BUILDNUMBER", build_number)])
}

fn sample_variables() -> VersionVariables {
    VersionVariables::new()
        .with("Major", "1")
        .with("Minor", "2")
        .with("Patch", "3")
        .with("FullSemVer", "1.2.3+4")
}

fn integrate(agent: &AzurePipelines, variables: &VersionVariables, update: bool) -> String {
    let mut out = Vec::new();
    agent
        .write_integration(&mut out, variables, update)
        .expect("writing to a Vec cannot fail");
    String::from_utf8(out).unwrap()
}

#[test]
fn test_branch_build_reports_branch() {
    let agent = azure(&[("BUILD_SOURCEBRANCH", "refs/heads/main")]);
    assert!(agent.detect());

    let branch = agent.get_current_branch(false);
    assert_eq!(branch, Some("refs/heads/main".to_string()));
}

#[test]
fn test_pull_request_build_defers_branch() {
    let agent = azure(&[("BUILD_SOURCEBRANCH", "refs/pull/5/merge")]);
    assert_eq!(agent.get_current_branch(false), None);
}

#[test]
fn test_empty_build_number_reports_full_sem_ver() {
    let agent = with_build_number("");
    let message = agent.generate_set_version_message(&sample_variables());
    assert_eq!(message, "1.2.3+4");
}

#[test]
fn test_plain_build_number_is_replaced() {
    let variables = VersionVariables::new().with("FullSemVer", "1.2.3+0");
    let agent = with_build_number("build-1");
    let message = agent.generate_set_version_message(&variables);
    assert_eq!(message, "##vso[build.updatebuildnumber]1.2.3");
}

#[test]
fn test_build_number_placeholder_is_substituted() {
    let variables = VersionVariables::new()
        .with("FullSemVer", "1.2.3+4")
        .with("Major", "1");
    let agent = with_build_number("$(GITVERSION.Major)-ci");
    let message = agent.generate_set_version_message(&variables);
    assert_eq!(message, "##vso[build.updatebuildnumber]1-ci");
}

#[test]
fn test_build_number_with_several_placeholders() {
    let build_number = "$(GITVERSION_MAJOR).$(gitversion.minor).$(GitVersion_Patch) (ci)";
    let agent = with_build_number(build_number);
    let message = agent.generate_set_version_message(&sample_variables());
    assert_eq!(message, "##vso[build.updatebuildnumber]1.2.3 (ci)");
}

#[test]
fn test_set_parameter_message_shape() {
    let agent = azure(&[]);
    let cases = [
        ("SemVer", "1.2.3"),
        ("BranchName", "feature/x"),
        ("Empty", ""),
    ];

    for (name, value) in cases {
        let lines = agent.generate_set_parameter_message(name, value);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.contains(name));
            assert!(line.ends_with(value));
        }

        let outputs = lines.iter().filter(|l| l.contains(";isOutput=true"));
        assert_eq!(outputs.count(), 1);
    }
}

#[test]
fn test_write_integration_output() {
    let agent = with_build_number("$(GITVERSION.Major)-ci");
    let variables = VersionVariables::new()
        .with("Major", "1")
        .with("FullSemVer", "1.2.3+4");

    let text = integrate(&agent, &variables, true);
    assert_eq!(
        text.lines().collect::<Vec<_>>(),
        vec![
            "##vso[build.updatebuildnumber]1-ci",
            "##vso[task.setvariable variable=GitVersion.Major]1",
            "##vso[task.setvariable variable=GitVersion.Major;isOutput=true]1",
            "##vso[task.setvariable variable=GitVersion.FullSemVer]1.2.3+4",
            "##vso[task.setvariable variable=GitVersion.FullSemVer;isOutput=true]1.2.3+4",
        ]
    );
}

#[test]
fn test_write_integration_without_build_number_update() {
    let agent = azure(&[]);
    let mut variables = VersionVariables::new().with("FullSemVer", "0.1.0");
    variables.insert("BuildMetaData", None);

    let text = integrate(&agent, &variables, false);
    assert!(!text.contains("updatebuildnumber"));
    let expected = "##vso[task.setvariable variable=GitVersion.BuildMetaData]\n";
    assert!(text.contains(expected));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_resolver_prefers_azure_over_local() {
    let env = MockEnvironment::new().with_variable("TF_BUILD", "True");
    let resolver = BuildAgentResolver::new(Arc::new(env), &Config::default());
    let agent = resolver.resolve();
    assert_eq!(agent.name(), "AzurePipelines");
    assert!(agent.prevent_fetch());
}

#[test]
fn test_resolver_without_ci_uses_local() {
    let env = Arc::new(MockEnvironment::new());
    let resolver = BuildAgentResolver::new(env, &Config::default());
    let agent = resolver.resolve();
    assert_eq!(agent.name(), "LocalBuild");
    assert!(!agent.prevent_fetch());

    let lines = agent.generate_set_parameter_message("Major", "1");
    assert!(lines.is_empty());
}
