use refdocs_core::config::{ResourceCategory, ResourceRef, default_inline_rules};
use refdocs_core::error::ModelError;
use refdocs_core::model::{DefinitionKey, Definitions, LinkStyle};
use refdocs_core::parse;
use refdocs_core::resolve::fields::initialize_fields;
use refdocs_core::resolve::toc::table_of_contents;
use refdocs_core::samples::{SampleProvider, TemplateSampleProvider, collect_samples};
use refdocs_core::{BuildOptions, build_definitions, build_definitions_with_options};

const K8S_MINI: &str = include_str!("fixtures/k8s-mini.json");

fn key(group: &str, version: &str, kind: &str) -> DefinitionKey {
    DefinitionKey::new(group, version, kind)
}

fn build() -> Definitions {
    let spec = parse::from_json(K8S_MINI).unwrap();
    build_definitions(&[spec]).expect("fixture should resolve")
}

fn workloads() -> Vec<ResourceCategory> {
    let resource = |group: &str, version: &str, name: &str| ResourceRef {
        name: name.to_string(),
        version: version.to_string(),
        group: group.to_string(),
        ..Default::default()
    };
    vec![ResourceCategory {
        name: "Workloads".to_string(),
        include: "workloads".to_string(),
        resources: vec![
            resource("apps", "v1beta2", "Deployment"),
            resource("core", "v1", "Pod"),
            resource("core", "v1", "PodSpec"),
            resource("core", "v1", "Service"),
        ],
    }]
}

#[test]
fn build_skips_utility_types() {
    let defs = build();
    assert_eq!(defs.len(), 14);
    assert!(defs.all().all(|d| d.name != "IntOrString" && d.name != "RawExtension"));
    assert!(defs.get_by_key("meta.v1.ObjectMeta").is_some());
}

#[test]
fn build_identity_and_lookup() {
    let defs = build();
    let pod = defs.get_by_group_version_kind("core", "v1", "Pod").unwrap();
    assert_eq!(pod.full_name, "io.k8s.kubernetes.pkg.api.v1.Pod");
    assert_eq!(pod.resource.as_deref(), Some("pods"));
    assert!(defs.get_by_group_version_kind("core", "v2", "Pod").is_none());
}

#[test]
fn build_resolves_fields() {
    let defs = build();
    let pod_spec = defs.get_by_key("core.v1.PodSpec").unwrap();
    let names: Vec<&str> = pod_spec.sorted_fields().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["containers", "nodeSelector", "restartPolicy"]);

    let containers = pod_spec.fields.iter().find(|f| f.name == "containers").unwrap();
    assert_eq!(containers.type_name, "Container array");
    assert_eq!(containers.definition, Some(key("core", "v1", "Container")));
    assert_eq!(containers.patch_strategy.as_deref(), Some("merge"));
    assert_eq!(containers.patch_merge_key.as_deref(), Some("name"));

    let node_selector = pod_spec.fields.iter().find(|f| f.name == "nodeSelector").unwrap();
    assert_eq!(node_selector.type_name, "map[string]string");
    assert!(node_selector.definition.is_none());

    let rolling = defs.get_by_key("apps.v1beta1.RollingUpdateDeployment").unwrap();
    assert_eq!(rolling.fields[0].type_name, "IntOrString");
    assert!(rolling.fields[0].definition.is_none());

    let meta = defs.get_by_key("meta.v1.ObjectMeta").unwrap();
    let labels = meta.fields.iter().find(|f| f.name == "labels").unwrap();
    assert!(!labels.description.contains('\n'));
}

#[test]
fn build_field_resolution_is_idempotent() {
    let mut defs = build();
    let before = defs.get_by_key("apps.v1beta1.Deployment").unwrap().fields.clone();
    assert!(initialize_fields(&mut defs, "apps.v1beta1.Deployment"));
    assert_eq!(defs.get_by_key("apps.v1beta1.Deployment").unwrap().fields, before);
}

#[test]
fn build_ranks_versions() {
    let defs = build();
    let order: Vec<&str> = defs.by_kind("Deployment").iter().map(|k| k.as_str()).collect();
    assert_eq!(
        order,
        [
            "apps.v1beta2.Deployment",
            "apps.v1beta1.Deployment",
            "extensions.v1beta1.Deployment"
        ]
    );
    assert!(!defs.get_by_key("apps.v1beta2.Deployment").unwrap().is_old_version);
    assert!(defs.get_by_key("apps.v1beta1.Deployment").unwrap().is_old_version);
    assert!(defs.get_by_key("extensions.v1beta1.Deployment").unwrap().is_old_version);

    // single-version kinds are never old
    for kind in defs.kinds() {
        if defs.by_kind(kind).len() == 1 {
            let only = defs.get_by_key(defs.by_kind(kind)[0].as_str()).unwrap();
            assert!(!only.is_old_version, "{kind} should not be old");
        }
    }

    // every old version has a current sibling
    for d in defs.all().filter(|d| d.is_old_version) {
        assert!(
            defs.resolve(defs.by_kind(&d.name)).any(|s| !s.is_old_version),
            "{} has no current sibling",
            d.key()
        );
    }
}

#[test]
fn build_other_versions() {
    let defs = build();
    let beta1 = defs.get_by_key("apps.v1beta1.Deployment").unwrap();
    assert_eq!(beta1.other_versions, vec![key("apps", "v1beta2", "Deployment")]);

    let beta2 = defs.get_by_key("apps.v1beta2.Deployment").unwrap();
    assert_eq!(
        beta2.other_versions,
        vec![
            key("apps", "v1beta1", "Deployment"),
            key("extensions", "v1beta1", "Deployment")
        ]
    );
    assert!(defs.get_by_key("core.v1.Pod").unwrap().other_versions.is_empty());
}

#[test]
fn build_appears_in_is_complete() {
    let defs = build();
    for parent in defs.all() {
        for target in parent.fields.iter().filter_map(|f| f.definition.as_ref()) {
            let target = defs.get_by_key(target.as_str()).unwrap();
            assert!(
                target.appears_in.contains(&parent.key()),
                "{} should appear in {}",
                target.key(),
                parent.key()
            );
        }
    }

    let pod_spec = defs.get_by_key("core.v1.PodSpec").unwrap();
    assert_eq!(
        pod_spec.appears_in,
        vec![key("core", "v1", "Pod"), key("core", "v1", "PodTemplateSpec")]
    );

    let meta = defs.get_by_key("meta.v1.ObjectMeta").unwrap();
    assert_eq!(meta.appears_in.len(), 5);

    let deployment = defs.get_by_key("apps.v1beta1.Deployment").unwrap();
    assert_eq!(deployment.appears_in, vec![key("apps", "v1beta1", "DeploymentList")]);
}

#[test]
fn build_inlines_subordinate_definitions() {
    let defs = build();
    let deployment = defs.get_by_key("apps.v1beta1.Deployment").unwrap();
    assert_eq!(
        deployment.inline,
        vec![
            key("apps", "v1beta1", "DeploymentList"),
            key("apps", "v1beta1", "DeploymentSpec"),
            key("apps", "v1beta1", "DeploymentStatus"),
            key("apps", "v1beta1", "DeploymentStrategy"),
            key("apps", "v1beta1", "RollingUpdateDeployment"),
        ]
    );
    for child in defs.resolve(&deployment.inline) {
        assert!(child.is_inlined);
        assert!(!child.in_toc);
    }

    let pod = defs.get_by_key("core.v1.Pod").unwrap();
    assert_eq!(
        pod.inline,
        vec![key("core", "v1", "PodSpec"), key("core", "v1", "PodStatus")]
    );

    // no PodTemplate kind is registered
    assert!(!defs.get_by_key("core.v1.PodTemplateSpec").unwrap().is_inlined);
}

#[test]
fn build_without_inline_rules() {
    let spec = parse::from_json(K8S_MINI).unwrap();
    let options = BuildOptions {
        inline_rules: Vec::new(),
        resource_categories: Vec::new(),
    };
    let defs = build_definitions_with_options(&[spec], &options).unwrap();
    assert!(defs.all().all(|d| !d.is_inlined && d.inline.is_empty()));
}

#[test]
fn build_table_of_contents() {
    let spec = parse::from_json(K8S_MINI).unwrap();
    let options = BuildOptions {
        inline_rules: default_inline_rules(),
        resource_categories: workloads(),
    };
    let defs = build_definitions_with_options(&[spec], &options).unwrap();

    assert!(defs.get_by_key("apps.v1beta2.Deployment").unwrap().in_toc);
    assert!(defs.get_by_key("core.v1.Pod").unwrap().in_toc);
    assert!(!defs.get_by_key("core.v1.PodSpec").unwrap().in_toc);
    assert!(!defs.get_by_key("apps.v1beta1.Deployment").unwrap().in_toc);

    let toc = table_of_contents(&defs, &options.resource_categories);
    assert_eq!(
        toc[0].definitions,
        vec![key("apps", "v1beta2", "Deployment"), key("core", "v1", "Pod")]
    );
}

#[test]
fn build_aborts_on_unrecognized_name() {
    let bad = parse::from_json(
        r#"{
            "swagger": "2.0",
            "definitions": {
                "io.k8s.kubernetes.pkg.api.v1.Pod": {},
                "io.k8s.api.core.v1.Service": {}
            }
        }"#,
    )
    .unwrap();
    let good = parse::from_json(K8S_MINI).unwrap();
    let err = build_definitions(&[good, bad]).unwrap_err();
    assert!(matches!(err, ModelError::UnrecognizedName(ref n) if n == "io.k8s.api.core.v1.Service"));
}

#[test]
fn build_merges_documents_last_write_wins() {
    let first = parse::from_json(K8S_MINI).unwrap();
    let second = parse::from_json(
        r#"{
            "swagger": "2.0",
            "definitions": {
                "io.k8s.kubernetes.pkg.api.v1.Pod": {"description": "Replacement pod."}
            }
        }"#,
    )
    .unwrap();
    let defs = build_definitions(&[first, second]).unwrap();
    assert_eq!(defs.len(), 14);
    let pod = defs.get_by_key("core.v1.Pod").unwrap();
    assert_eq!(pod.description(), "Replacement pod.");
    assert!(pod.fields.is_empty());
    assert!(defs.get_by_key("core.v1.PodSpec").unwrap().appears_in
        == vec![key("core", "v1", "PodTemplateSpec")]);
}

#[test]
fn field_links_follow_link_style() {
    let defs = build();
    let pod = defs.get_by_key("core.v1.Pod").unwrap();
    let spec = pod.fields.iter().find(|f| f.name == "spec").unwrap();
    assert_eq!(spec.md_type(&defs, LinkStyle::Tags), "[PodSpec](#podspec-v1)");
    assert_eq!(spec.md_type(&defs, LinkStyle::Grouped), "[PodSpec](#podspec-v1-core)");

    let pod_spec = defs.get_by_key("core.v1.PodSpec").unwrap();
    let containers = pod_spec.fields.iter().find(|f| f.name == "containers").unwrap();
    assert_eq!(
        containers.md_type(&defs, LinkStyle::Tags),
        "[Container](#container-v1) array"
    );
    let policy = pod_spec.fields.iter().find(|f| f.name == "restartPolicy").unwrap();
    assert_eq!(policy.md_type(&defs, LinkStyle::Tags), "string");
}

#[test]
fn samples_for_resolved_definitions() {
    let defs = build();
    let providers: Vec<Box<dyn SampleProvider>> = vec![
        Box::new(TemplateSampleProvider::new(
            "kubectl",
            "bash",
            "kubectl apply -f {{ name | lower }}.yaml",
        )),
        Box::new(TemplateSampleProvider::new("yaml", "yaml", "{{ example }}")),
    ];

    let deployment = defs.get_by_key("apps.v1beta1.Deployment").unwrap();
    let samples = collect_samples(deployment, &providers);
    assert_eq!(samples.len(), 2);
    insta::assert_snapshot!(samples[0].text, @"kubectl apply -f deployment.yaml");
    assert!(samples[1].text.contains("name: nginx-deployment"));

    // Pod has no example; every provider yields empty text
    let pod = defs.get_by_key("core.v1.Pod").unwrap();
    let samples = collect_samples(pod, &providers);
    assert!(samples.iter().all(|s| s.text.is_empty()));
    assert_eq!(samples[1].tab, "yaml");
}
