#![cfg(target_arch = "wasm32")]

use curvepoly_wasm::Polygon;
use js_sys::Reflect;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn is_ok(v: &JsValue) -> bool {
    Reflect::get(v, &JsValue::from_str("ok"))
        .ok()
        .and_then(|x| x.as_bool())
        .unwrap_or(false)
}

fn is_err(v: &JsValue, code: &str) -> bool {
    if is_ok(v) {
        return false;
    }
    if let Ok(err) = Reflect::get(v, &JsValue::from_str("error")) {
        if let Ok(c) = Reflect::get(&err, &JsValue::from_str("code")) {
            return c.as_string().map_or(false, |s| s == code);
        }
    }
    false
}

fn square() -> Polygon {
    Polygon::from_points(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]).unwrap()
}

#[wasm_bindgen_test]
fn invalid_ids_and_inputs_return_typed_errors() {
    let mut p = square();
    let ver = p.geom_version();
    assert!(is_err(&p.move_vertex_res(999, 0.0, 0.0), "invalid_id"));
    assert!(is_err(&p.move_vertex_res(0, f64::NAN, 0.0), "non_finite"));
    assert!(is_err(&p.convert_edge_res(999, 1), "invalid_id"));
    assert!(is_err(&p.convert_edge_res(0, 7), "invalid_code"));
    assert!(is_err(&p.move_control_point_res(0, 0, 1.0, 1.0), "not_bezier"));
    assert!(is_err(&p.move_control_point_res(0, 5, 1.0, 1.0), "invalid_code"));
    assert!(is_err(&p.set_edge_constraint_res(0, 3, -2.0), "invalid_length"));
    assert!(is_err(&p.get_vertex_res(42), "invalid_id"));
    assert_eq!(p.geom_version(), ver, "state mutated on error");
}

#[wasm_bindgen_test]
fn rule_violations_carry_their_codes() {
    let mut p = square();
    assert!(is_err(&p.set_vertex_continuity_res(1, 1), "line_only_vertex"));
    assert!(is_ok(&p.set_edge_constraint_res(1, 1, 0.0)));
    assert!(is_err(&p.set_edge_constraint_res(2, 1, 0.0), "adjacent_vertical"));

    assert!(is_ok(&p.convert_edge_res(0, 1)));
    assert!(is_ok(&p.convert_edge_res(1, 2)));
    assert!(is_err(&p.set_vertex_continuity_res(1, 2), "c1_with_arc"));
    assert!(is_err(&p.set_edge_constraint_res(1, 1, 0.0), "not_line"));

    let mut t = Polygon::new();
    let r = t.delete_vertex_res(0);
    assert!(is_err(&r, "too_few_vertices"));
    let data = Reflect::get(&Reflect::get(&r, &JsValue::from_str("error")).unwrap(), &JsValue::from_str("data")).unwrap();
    assert_eq!(Reflect::get(&data, &JsValue::from_str("min")).unwrap().as_f64(), Some(3.0));
}

#[wasm_bindgen_test]
fn invalid_code_lists_allowed_values() {
    let mut p = square();
    let r = p.set_vertex_continuity_res(0, 9);
    assert!(is_err(&r, "invalid_code"));
    let err = Reflect::get(&r, &JsValue::from_str("error")).unwrap();
    let data = Reflect::get(&err, &JsValue::from_str("data")).unwrap();
    let field = |k: &str| Reflect::get(&data, &JsValue::from_str(k)).unwrap();
    assert_eq!(field("param").as_string().as_deref(), Some("kind"));
    assert_eq!(field("got").as_f64(), Some(9.0));
    assert_eq!(field("allowed").as_string().as_deref(), Some("0:G0, 1:G1, 2:C1"));
}

#[wasm_bindgen_test]
fn res_variants_wrap_values() {
    let mut p = square();
    let r = p.insert_vertex_on_edge_res(0);
    assert!(is_ok(&r));
    let id = Reflect::get(&r, &JsValue::from_str("value")).unwrap().as_f64().unwrap() as u32;
    assert_eq!(p.vertex_count(), 5);
    assert!(is_ok(&p.delete_vertex_res(id)));
    assert!(is_ok(&p.get_edge_geometry_res(0)));
}
