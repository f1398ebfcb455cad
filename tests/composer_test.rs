//! Behaviour of the composer as seen through the serialized document.

use agent_composer::domain::models::tool::STRUCTURED_RESEARCH_GUIDELINES_PROMPT;
use agent_composer::domain::models::{ToolKind, WorkflowDocument};
use agent_composer::services::composer;
use agent_composer::ComposerError;
use serde_yaml::Value;

fn research_config(yaml: &str) -> Value {
    let value: Value = serde_yaml::from_str(yaml).unwrap();
    value["nodes"]["research"]["config"].clone()
}

fn tool_names(config: &Value) -> Vec<String> {
    config["tools_config"]
        .as_sequence()
        .unwrap()
        .iter()
        .map(|tool| tool["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_empty_selection_keeps_template_defaults() {
    let yaml = composer::compose(&[]).unwrap();
    let config = research_config(&yaml);

    assert_eq!(config["tools_config"], Value::Sequence(vec![]));
    assert!(config["agent_config"].get("research_guidelines_prompt").is_none());

    let doc = WorkflowDocument::from_yaml(&yaml).unwrap();
    let prompt = composer::research_guidelines_prompt(&doc).unwrap();
    assert!(prompt.starts_with("You have access to tools configured for this agent."));
}

#[test]
fn test_structured_search_serialized_shape() {
    let yaml = composer::compose(&[ToolKind::StructuredSearch]).unwrap();
    let config = research_config(&yaml);

    assert_eq!(tool_names(&config), ["get_schema", "execute_sql_query"]);
    assert_eq!(
        config["agent_config"]["research_guidelines_prompt"].as_str(),
        Some(STRUCTURED_RESEARCH_GUIDELINES_PROMPT)
    );

    let get_schema = &config["tools_config"][0];
    assert_eq!(
        get_schema["graph_config"]["nodes"]["get_schema"]["type"],
        "GetStructuredDatastoreSchemaStep"
    );
    let sql = &config["tools_config"][1]["graph_config"];
    assert_eq!(sql["version"], "0.1");
    assert_eq!(sql["inputs"]["sql_query"], "str");
    assert_eq!(sql["nodes"]["__outputs__"]["ui_output"], "retrievals");
}

#[test]
fn test_unstructured_search_step_parameters() {
    let yaml = composer::compose(&[ToolKind::UnstructuredSearch]).unwrap();
    let config = research_config(&yaml);
    let step = &config["tools_config"][0]["step_config"];

    assert_eq!(step["type"], "SearchUnstructuredDataStep");
    assert_eq!(step["config"]["top_k"], 50);
    assert_eq!(step["config"]["rerank_top_k"], 12);
    assert_eq!(
        step["config"]["reranker"],
        "ctxl-rerank-v2-instruct-multilingual-FP8"
    );
    assert_eq!(step["config"]["reranker_score_filter_threshold"], 0.2);
}

#[test]
fn test_compose_preserves_untouched_nodes() {
    let yaml = composer::compose(&[ToolKind::WebSearch]).unwrap();
    let value: Value = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(value["version"], 0.1);
    assert_eq!(value["inputs"]["query"], "str");
    assert_eq!(
        value["nodes"]["generate"]["input_mapping"]["research"],
        "research#research"
    );
    assert_eq!(
        value["nodes"]["research"]["config"]["agent_config"]["agent_loop"]["num_turns"],
        10
    );
    assert_eq!(
        value["nodes"]["__outputs__"]["input_mapping"]["response"],
        "generate#response"
    );
}

#[test]
fn test_all_kinds_compose_in_selection_order() {
    let doc = composer::compose_document(&[
        ToolKind::UnstructuredSearch,
        ToolKind::WebSearch,
        ToolKind::StructuredSearch,
    ])
    .unwrap();
    assert_eq!(
        composer::tool_names(&doc).unwrap(),
        ["search_docs", "web_search", "get_schema", "execute_sql_query"]
    );
}

#[test]
fn test_repeated_adds_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analyst.yaml");
    std::fs::write(&path, composer::compose(&[]).unwrap()).unwrap();

    composer::add_tool_to_file(&path, ToolKind::UnstructuredSearch).unwrap();
    composer::add_tool_to_file(&path, ToolKind::UnstructuredSearch).unwrap();
    composer::add_tool_to_file(&path, ToolKind::WebSearch).unwrap();
    let text = composer::add_tool_to_file(&path, ToolKind::WebSearch).unwrap();

    assert_eq!(
        tool_names(&research_config(&text)),
        ["search_docs", "web_search", "web_search"]
    );
}

#[test]
fn test_foreign_tool_entries_survive() {
    let yaml = r#"
version: 0.1
nodes:
  research:
    type: AgenticResearchStep
    config:
      tools_config:
        - just a string
        - name: custom_tool
          description: hand written
          step_config:
            type: CustomStep
            config:
              knob: 3
        - 42
"#;
    let mut doc = WorkflowDocument::from_yaml(yaml).unwrap();
    assert!(composer::has_tool_by_name(&doc, "custom_tool").unwrap());
    assert!(!composer::has_tool_by_name(&doc, "Custom_Tool").unwrap());

    composer::add_tool(&mut doc, ToolKind::WebSearch).unwrap();
    let out = doc.to_yaml().unwrap();
    let config = research_config(&out);
    let tools = config["tools_config"].as_sequence().unwrap();
    assert_eq!(tools.len(), 4);
    assert_eq!(tools[0], "just a string");
    assert_eq!(tools[1]["step_config"]["config"]["knob"], 3);
    assert_eq!(tools[2], 42);
    assert_eq!(tools[3]["name"], "web_search");
}

#[test]
fn test_shape_errors_name_the_missing_segment() {
    let no_nodes = WorkflowDocument::from_yaml("version: 0.1\n").unwrap();
    match composer::has_tool_by_name(&no_nodes, "x") {
        Err(ComposerError::ConfigShape { path }) => assert_eq!(path, "nodes"),
        other => panic!("expected shape error, got {other:?}"),
    }

    let scalar_config =
        WorkflowDocument::from_yaml("nodes:\n  research:\n    type: AgenticResearchStep\n    config: 5\n")
            .unwrap();
    match composer::has_tool_by_name(&scalar_config, "x") {
        Err(ComposerError::ConfigShape { path }) => assert_eq!(path, "nodes.research.config"),
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    assert!(matches!(
        WorkflowDocument::from_yaml("nodes: [unclosed"),
        Err(ComposerError::Parse(_))
    ));
}
