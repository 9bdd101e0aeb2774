use pretty_assertions::assert_eq;
use rs_cfn_spec::cloudformation::{
    regional_specifications, ItemType, PrimitiveType, PropertyType, RegionalSpecificationData, Specification,
    SpecificationError, ValueType, SPECIFICATION_INDEX_URL,
};
use rs_cfn_spec::{parse_document, Error, Options, TableReadError};

/// Shape of the published index page: the region cell spans both header
/// rows and the specification heading spans the two file columns.
const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-US">
<head><meta charset="utf-8"><title>Resource specification</title></head>
<body>
  <div id="main-content">
    <h1>AWS CloudFormation resource specification</h1>
    <p>The following table lists the specification files per region.</p>
    <div class="table-container">
      <table id="w1aab5b9">
        <thead>
          <tr>
            <th rowspan="2">Region</th>
            <th colspan="2">Resource specification</th>
            <th rowspan="2">Notes</th>
          </tr>
          <tr>
            <th>Single file</th>
            <th>All files</th>
          </tr>
        </thead>
        <tbody>
          <tr>
            <td><code>us-east-1</code></td>
            <td><a href="https://d1uauaxba7bl26.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json" rel="noopener noreferrer" target="_blank">JSON</a></td>
            <td><a href="https://d1uauaxba7bl26.cloudfront.net/latest/CloudFormationResourceSpecification.zip">Zip</a></td>
            <td rowspan="2">Commercial</td>
          </tr>
          <tr>
            <td><code>us-west-2</code></td>
            <td><a href="https://d201a2mn26r7lk.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json">JSON</a></td>
            <td><a href="https://d201a2mn26r7lk.cloudfront.net/latest/CloudFormationResourceSpecification.zip">Zip</a></td>
          </tr>
          <tr>
            <td><code>cn-north-1</code></td>
            <td colspan="2"><a href="/cn/CloudFormationResourceSpecification.json">JSON</a></td>
            <td>China</td>
          </tr>
        </tbody>
      </table>
    </div>
  </div>
</body>
</html>"#;

fn options() -> Options {
    Options {
        base_url: Some(SPECIFICATION_INDEX_URL.to_string()),
        ..Options::default()
    }
}

#[test]
fn reads_regional_specifications_from_index_page() {
    let doc = match parse_document(INDEX_PAGE.as_bytes()) {
        Ok(doc) => doc,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let data = match regional_specifications(&doc, &options()) {
        Ok(data) => data,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(
        data,
        vec![
            RegionalSpecificationData {
                region: "us-east-1".to_string(),
                url: "https://d1uauaxba7bl26.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json"
                    .to_string(),
            },
            RegionalSpecificationData {
                region: "us-west-2".to_string(),
                url: "https://d201a2mn26r7lk.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json"
                    .to_string(),
            },
            RegionalSpecificationData {
                region: "cn-north-1".to_string(),
                url: "https://docs.aws.amazon.com/cn/CloudFormationResourceSpecification.json".to_string(),
            },
        ]
    );
}

#[test]
fn regional_specifications_serialize_to_json() {
    let doc = match parse_document(INDEX_PAGE.as_bytes()) {
        Ok(doc) => doc,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    let data = regional_specifications(&doc, &options());

    let json = data.ok().and_then(|d| serde_json::to_value(&d).ok());
    let regions: Option<Vec<String>> = json.as_ref().and_then(|j| j.as_array()).map(|items| {
        items
            .iter()
            .filter_map(|item| item["region"].as_str().map(str::to_string))
            .collect()
    });
    assert_eq!(
        regions,
        Some(vec!["us-east-1".to_string(), "us-west-2".to_string(), "cn-north-1".to_string()])
    );
}

#[test]
fn custom_headings_select_other_columns() {
    let doc = match parse_document(INDEX_PAGE.as_bytes()) {
        Ok(doc) => doc,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    let options = Options {
        url_heading: "All files".to_string(),
        ..options()
    };

    let urls: Vec<String> = match regional_specifications(&doc, &options) {
        Ok(data) => data.into_iter().map(|d| d.url).collect(),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(urls[0].ends_with("CloudFormationResourceSpecification.zip"));
    // The China row spans both file columns with a single link.
    assert!(urls[2].ends_with("/cn/CloudFormationResourceSpecification.json"));
}

#[test]
fn row_without_link_reports_its_index() {
    let page = INDEX_PAGE.replace(
        r#"<a href="https://d201a2mn26r7lk.cloudfront.net/latest/gzip/CloudFormationResourceSpecification.json">JSON</a>"#,
        "unavailable",
    );
    let doc = match parse_document(page.as_bytes()) {
        Ok(doc) => doc,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let result = regional_specifications(&doc, &options());

    assert!(matches!(result, Err(SpecificationError::MissingAnchor { row: 1 })));
}

#[test]
fn decodes_specification_file() {
    let json = r#"{
        "ResourceSpecificationVersion": "18.0.0",
        "PropertyTypes": {
            "AWS::Lambda::Function.Environment": {
                "Documentation": "https://docs/env",
                "Properties": {
                    "Variables": {
                        "Documentation": "https://docs/env#vars",
                        "DuplicatesAllowed": false,
                        "PrimitiveItemType": "String",
                        "Required": false,
                        "Type": "Map",
                        "UpdateType": "Mutable"
                    }
                }
            }
        },
        "ResourceTypes": {
            "AWS::Lambda::Function": {
                "Documentation": "https://docs/function",
                "Attributes": {"Arn": {"PrimitiveType": "String"}},
                "Properties": {
                    "Environment": {"Documentation": "e", "Required": false, "Type": "Environment", "UpdateType": "Mutable"},
                    "MemorySize": {"Documentation": "m", "Required": false, "PrimitiveType": "Integer", "UpdateType": "Mutable"},
                    "Layers": {"Documentation": "l", "Required": false, "Type": "List", "PrimitiveItemType": "String", "UpdateType": "Mutable"}
                }
            }
        }
    }"#;

    let spec = match Specification::from_json(json) {
        Ok(spec) => spec,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(spec.resource_specification_version, "18.0.0");
    let function = &spec.resource_types["AWS::Lambda::Function"];
    assert_eq!(
        function.properties["MemorySize"].value_type,
        ValueType::Primitive(PrimitiveType::Integer)
    );
    assert_eq!(
        function.properties["Environment"].value_type,
        ValueType::Named("Environment".to_string())
    );

    let nested: Vec<&str> = spec
        .property_types_of("AWS::Lambda::Function")
        .map(|(name, _)| name)
        .collect();
    assert_eq!(nested, vec!["Environment"]);
    match &spec.property_types["AWS::Lambda::Function.Environment"] {
        PropertyType::Struct(structure) => assert!(matches!(
            structure.properties["Variables"].value_type,
            ValueType::Map(ItemType::Primitive(_))
        )),
        PropertyType::Value(property) => panic!("expected a structure, got {property:?}"),
    }
}

#[test]
fn rejects_specification_with_unknown_update_type() {
    let json = r#"{
        "ResourceSpecificationVersion": "1.0.0",
        "PropertyTypes": {},
        "ResourceTypes": {
            "AWS::X::Y": {
                "Documentation": "d",
                "Properties": {"P": {"Documentation": "p", "Required": true, "PrimitiveType": "String", "UpdateType": "Sometimes"}}
            }
        }
    }"#;

    assert!(matches!(Specification::from_json(json), Err(SpecificationError::Json(_))));
}

fn regions_from_bytes(html: &[u8]) -> rs_cfn_spec::Result<Vec<String>> {
    let doc = parse_document(html)?;
    let data = regional_specifications(&doc, &options())?;
    Ok(data.into_iter().map(|d| d.region).collect())
}

#[test]
fn crate_error_absorbs_parse_and_specification_failures() {
    assert!(regions_from_bytes(INDEX_PAGE.as_bytes()).is_ok_and(|regions| regions.len() == 3));

    assert!(matches!(regions_from_bytes(b"<p>\xc3\x28</p>"), Err(Error::Parse(_))));
    assert!(matches!(
        regions_from_bytes(b"<table><tbody><tr><td>x</td></tr></tbody></table>"),
        Err(Error::Specification(SpecificationError::Table(TableReadError::MissingSection { tag: "thead" })))
    ));
}
