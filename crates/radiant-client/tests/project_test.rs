mod common;

use common::{client, client_in, project, scene, FakeTransport, TILES};
use radiant_client::{Method, Project, ProjectConfigEntry};
use radiant_core::error::RadiantError;
use radiant_core::models::{Bbox, ExportStatus, NewProject, Visibility};
use serde_json::{json, Value};

fn scene_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_create_project_body() {
    let fake = FakeTransport::new();
    fake.json(Method::Post, "/projects/", project("p1"));
    let client = client(&fake);

    let new = NewProject::new("Harvest 2018")
        .description("fields")
        .tile_visibility(Visibility::Public)
        .aoi_project(true)
        .tag("crops");
    let project = Project::create(&client, &new).unwrap();
    assert_eq!(project.id(), "p1");

    let body = fake.requests_to(Method::Post, "/projects/")[0].json.clone().unwrap();
    assert_eq!(
        body,
        json!({
            "name": "Harvest 2018",
            "description": "fields",
            "visibility": "PRIVATE",
            "tileVisibility": "PUBLIC",
            "isAOIProject": true,
            "tags": ["crops"]
        })
    );
}

#[test]
fn test_add_ordered_scenes() {
    let fake = FakeTransport::new();
    fake.json(Method::Post, "/projects/p1/scenes/", json!(2));
    fake.page("/projects/p1/scenes/", 0, false, json!([scene("a", None, &[]), scene("b", None, &[])]));
    fake.respond(Method::Put, "/projects/p1/order/", 204, "");
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let added = project.add_ordered_scenes(&scene_ids(&["b", "a"])).unwrap();

    assert_eq!(added, 2);
    let put = fake.requests_to(Method::Put, "/projects/p1/order/");
    assert_eq!(put.len(), 1);
    assert_eq!(put[0].json, Some(json!(["b", "a"])));
}

#[test]
fn test_scene_order_must_match_project() {
    let fake = FakeTransport::new();
    fake.page("/projects/p1/scenes/", 0, false, json!([scene("a", None, &[]), scene("b", None, &[])]));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    for ids in [vec!["a"], vec!["a", "b", "c"], vec!["a", "a", "b"]] {
        let err = project.set_scene_order(&scene_ids(&ids)).unwrap_err();
        assert!(matches!(err, RadiantError::SceneOrderMismatch { .. }), "{ids:?}");
    }
    assert!(fake.requests_to(Method::Put, "/projects/p1/order/").is_empty());
}

#[test]
fn test_scene_listings() {
    let fake = FakeTransport::new();
    fake.page(
        "/projects/p1/scenes/",
        0,
        true,
        json!([scene("low", Some(1), &["s3://low/b1.tif", "s3://low/b2.tif"]), scene("loose", None, &["s3://loose.tif"])]),
    );
    fake.page("/projects/p1/scenes/", 1, false, json!([scene("top", Some(0), &["s3://top.tif"])]));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let ordered = project.ordered_scene_ids().unwrap();
    assert_eq!(ordered.get(&0).map(String::as_str), Some("top"));
    assert_eq!(ordered.get(&1).map(String::as_str), Some("low"));
    assert_eq!(ordered.len(), 2);

    assert_eq!(
        project.image_source_uris().unwrap(),
        ["s3://top.tif", "s3://low/b1.tif", "s3://low/b2.tif", "s3://loose.tif"]
    );

    let status = project.scenes_ingest_status().unwrap();
    assert_eq!(status["top"].as_deref(), Some("INGESTED"));
}

#[test]
fn test_center_and_tms() {
    let fake = FakeTransport::new();
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    assert_eq!(project.center().unwrap(), (22.0, 11.0));
    assert_eq!(
        project.tms_url(),
        format!("{}/tiles/p1/{{z}}/{{x}}/{{y}}/?token=test-token", TILES)
    );

    let bare = Project::new(&client, serde_json::from_value(json!({"id": "p2", "name": "bare"})).unwrap());
    assert!(matches!(bare.center(), Err(RadiantError::MissingField { .. })));
}

#[test]
fn test_map_token_first_match() {
    let fake = FakeTransport::new();
    fake.json(
        Method::Get,
        "/map-tokens/",
        json!({"page": 0, "hasNext": false, "results": [{"id": "t1", "name": "first"}, {"id": "t2", "name": "second"}]}),
    );
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    assert_eq!(project.map_token().unwrap().map(|t| t.id), Some("t1".to_string()));
    assert_eq!(fake.requests()[0].param("project"), Some("p1"));
}

#[test]
fn test_thumbnail_download() {
    let fake = FakeTransport::new();
    fake.respond(Method::Get, &format!("{}/tiles/p1/export/", TILES), 200, vec![0x89, b'P', b'N', b'G']);
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let bytes = project.png(&Bbox::new(0.0, 0.0, 1.0, 1.0), 10, true).unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);

    let request = &fake.requests()[0];
    assert_eq!(request.accept.as_deref(), Some("image/png"));
    assert_eq!(request.param("bbox"), Some("0,0,1,1"));
    assert_eq!(request.param("colorCorrect"), Some("false"));
    assert_eq!(request.param("token"), Some("test-token"));
}

#[test]
fn test_thumbnail_gateway_timeout() {
    let fake = FakeTransport::new();
    fake.respond(Method::Get, &format!("{}/tiles/p1/export/", TILES), 504, "timeout");
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let err = project.geotiff(&Bbox::new(0.0, 0.0, 1.0, 1.0), 18, false).unwrap_err();
    assert!(matches!(err, RadiantError::GatewayTimeout { .. }));
}

#[test]
fn test_create_export_wraps_polygon_mask() {
    let fake = FakeTransport::new();
    fake.json(Method::Post, "/exports/", json!({"id": "e1", "exportStatus": "NOTEXPORTED"}));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let polygon = json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
    assert_eq!(project.create_export(12, Some(&polygon)).unwrap(), "e1");

    let body = fake.requests_to(Method::Post, "/exports/")[0].json.clone().unwrap();
    assert_eq!(body["projectId"], "p1");
    assert_eq!(body["exportStatus"], "NOTEXPORTED");
    assert_eq!(body["exportType"], "S3");
    assert_eq!(body["visibility"], "PRIVATE");
    assert_eq!(body["exportOptions"]["resolution"], 12);
    assert_eq!(body["exportOptions"]["mask"]["type"], "MultiPolygon");
    assert_eq!(body["exportOptions"]["mask"]["coordinates"], json!([polygon]));
}

#[test]
fn test_create_export_without_mask() {
    let fake = FakeTransport::new();
    fake.json(Method::Post, "/exports/", json!({"id": "e2"}));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    project.create_export(10, None).unwrap();
    let body = fake.requests_to(Method::Post, "/exports/")[0].json.clone().unwrap();
    assert_eq!(body["exportOptions"]["mask"], Value::Null);
}

#[test]
fn test_create_export_bad_depth() {
    let fake = FakeTransport::new();
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let err = project.create_export(10, Some(&json!([[0.0, 0.0], [1.0, 1.0]]))).unwrap_err();
    assert!(matches!(err, RadiantError::InvalidExportMask { depth: 2 }));
    assert!(fake.requests().is_empty());
}

#[test]
fn test_export_from_shape_and_status() {
    let fake = FakeTransport::new();
    fake.json(
        Method::Get,
        "/shapes/s1",
        json!({"type": "Feature", "id": "s1", "properties": {"name": "a"}, "geometry": common::square(0.0, 0.0)}),
    );
    fake.json(Method::Post, "/exports/", json!({"id": "e3"}));
    fake.json(Method::Get, "/exports/e3", json!({"id": "e3", "exportStatus": "EXPORTING"}));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    let export_id = project.export_from_shape_id("s1", 10).unwrap();
    assert_eq!(project.export_status(&export_id).unwrap(), ExportStatus::Exporting);

    let body = fake.requests_to(Method::Post, "/exports/")[0].json.clone().unwrap();
    assert_eq!(body["exportOptions"]["mask"]["coordinates"].as_array().unwrap().len(), 1);
}

#[test]
fn test_post_annotations_converts_properties() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("predictions.json");
    std::fs::write(
        &path,
        json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": common::square(0.0, 0.0),
                "properties": {"class_name": "building", "score": 0.9, "class_id": 1}
            }]
        })
        .to_string(),
    )
    .unwrap();

    let fake = FakeTransport::new();
    fake.json(Method::Post, "/projects/p1/annotations/", json!({}));
    let client = client(&fake);
    let project = Project::new(&client, serde_json::from_value(project("p1")).unwrap());

    project.post_annotations(&path).unwrap();

    let body = fake.requests_to(Method::Post, "/projects/p1/annotations/")[0].json.clone().unwrap();
    assert_eq!(
        body["features"][0]["properties"],
        json!({"label": "building", "description": "", "machineGenerated": true, "confidence": 0.9})
    );
}

#[test]
fn test_project_config_saves_annotations() {
    let dir = tempfile::tempdir().unwrap();
    let fake = FakeTransport::new();
    fake.json(Method::Get, "/projects/p1", project("p1"));
    fake.page("/projects/p1/scenes/", 0, false, json!([scene("a", Some(0), &["s3://a.tif"])]));
    fake.feature_page(
        "/projects/p1/annotations/",
        0,
        false,
        json!([{"type": "Feature", "geometry": common::square(0.0, 0.0), "properties": {"label": "car"}}]),
    );
    let client = client_in(dir.path(), &fake);

    let output = dir.path().join("config.json");
    client.save_project_config(&["p1".to_string()], &output, None).unwrap();

    let entries: Vec<ProjectConfigEntry> =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, "p1");
    assert_eq!(entries[0].images, ["s3://a.tif"]);
    assert!(entries[0].annotations.starts_with(dir.path().join("annotations")));

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&entries[0].annotations).unwrap()).unwrap();
    assert_eq!(saved["features"][0]["properties"]["label"], "car");
}

#[test]
fn test_project_config_with_explicit_paths() {
    let fake = FakeTransport::new();
    fake.json(Method::Get, "/projects/p1", project("p1"));
    fake.page("/projects/p1/scenes/", 0, false, json!([]));
    let client = client(&fake);

    let paths = vec![std::path::PathBuf::from("labels/p1.json")];
    let entries = client.project_config(&["p1".to_string()], Some(paths.as_slice())).unwrap();
    assert_eq!(entries[0].annotations, paths[0]);
    assert!(fake.requests_to(Method::Get, "/projects/p1/annotations/").is_empty());

    let err = client.project_config(&["p1".to_string(), "p2".to_string()], Some(paths.as_slice())).unwrap_err();
    assert!(matches!(err, RadiantError::ConfigInvalid { .. }));
}
