//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use reqres_core::{
    ApiError, Employee, EmployeeField, EmployeeObject, HttpMethod, HttpRequest, HttpResponse, ReqresClient, Resource,
    User,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/api";

fn client() -> ReqresClient {
    ReqresClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn assert_expected_error(name: &str, case: &Value, err: ApiError) {
    match case["expected_error"].as_str().unwrap() {
        "UnexpectedStatus" => assert!(
            matches!(err, ApiError::UnexpectedStatus { .. }),
            "{name}: expected UnexpectedStatus, got {err:?}"
        ),
        "UnknownField" => assert!(
            matches!(err, ApiError::UnknownField(_)),
            "{name}: expected UnknownField, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let raw = include_str!("../../test-vectors/create.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let mut payload = EmployeeObject::new();
        if let Some(n) = input["name"].as_str() {
            payload = payload.with_name(n);
        }
        if let Some(j) = input["job"].as_str() {
            payload = payload.with_job(j);
        }

        // Verify build
        let req = c.build_create_employee(&payload).unwrap();
        let expected_req = &case["expected_request"];
        assert_request(name, &req, expected_req);

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        // Verify parse
        let employee = c.parse_create_employee(simulated_response(case), 201).unwrap();
        let expected: Employee = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(employee, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let raw = include_str!("../../test-vectors/update.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut employee: Employee = serde_json::from_value(case["employee"].clone()).unwrap();
        let id = employee.id().unwrap().to_string();

        // Verify build
        let req = c.build_update_employee(&id, &employee).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse + merge
        let changes = c.parse_employee_changes(simulated_response(case), 200).unwrap();
        employee.merge(changes).unwrap();
        let expected: Employee = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(employee, expected, "{name}: merged result");
    }
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

#[test]
fn patch_test_vectors() {
    let raw = include_str!("../../test-vectors/patch.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let mut employee: Employee = serde_json::from_value(case["employee"].clone()).unwrap();
        let before = employee.clone();
        let id = employee.id().unwrap().to_string();
        let fields: Vec<EmployeeField> = case["input"]
            .as_object()
            .unwrap()
            .iter()
            .map(|(key, value)| EmployeeField::from_entry(key, value.clone()).unwrap())
            .collect();

        // Verify build
        let req = c.build_patch_employee(&id, &fields).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse + merge
        let changes = c.parse_employee_changes(simulated_response(case), 200).unwrap();
        let result = employee.merge(changes);

        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
            assert_eq!(employee, before, "{name}: rejected merge must not change the employee");
        } else {
            result.unwrap();
            let expected: Employee = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(employee, expected, "{name}: merged result");
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let raw = include_str!("../../test-vectors/delete.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();

        // Verify build
        let req = c.build_delete_employee(id);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_delete_employee(simulated_response(case), 204);
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            assert_eq!(result.unwrap() as u64, case["expected_status"].as_u64().unwrap(), "{name}: status");
        }
    }
}

// ---------------------------------------------------------------------------
// List users
// ---------------------------------------------------------------------------

#[test]
fn list_users_test_vectors() {
    let raw = include_str!("../../test-vectors/list_users.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let page = case["input_page"].as_u64().unwrap() as u32;

        // Verify build
        let req = c.build_list_users(page);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let users = c.parse_list_users(simulated_response(case), 200).unwrap().data;
        let expected: Vec<User> = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(users, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get resource
// ---------------------------------------------------------------------------

#[test]
fn get_resource_test_vectors() {
    let raw = include_str!("../../test-vectors/get_resource.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();

        // Verify build
        let req = c.build_get_resource(id);
        assert_request(name, &req, &case["expected_request"]);

        // Verify parse
        let result = c.parse_get_resource(simulated_response(case), 200);
        if case.get("expected_error").is_some() {
            assert_expected_error(name, case, result.unwrap_err());
        } else {
            let expected: Resource = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}
