use crate::interop::{new_obj, set_kv};
use curvepoly::EditError;
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

#[inline]
pub fn invalid_code(param: &str, got: u8, allowed: &str) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "got", &JsValue::from_f64(got as f64));
    set_kv(&d, "allowed", &JsValue::from_str(allowed));
    err("invalid_code", format!("{} must be {}", param, allowed), Some(d.into()))
}

/// Envelope for a refused core edit. Structured data rides along where the UI
/// can use it.
pub fn from_edit(e: &EditError) -> JsValue {
    let msg = e.to_string();
    match e {
        EditError::UnknownVertex(id) => invalid_id("vertex", *id),
        EditError::UnknownEdge(id) => invalid_id("edge", *id),
        EditError::NonFinite(param) => non_finite(param),
        EditError::NotLine(edge) | EditError::NotBezier(edge) => {
            let d = new_obj(); set_kv(&d, "edge", &JsValue::from_f64(*edge as f64));
            err(e.code(), msg, Some(d.into()))
        }
        EditError::TooFewVertices { count, min } => {
            let d = new_obj();
            set_kv(&d, "count", &JsValue::from_f64(*count as f64));
            set_kv(&d, "min", &JsValue::from_f64(*min as f64));
            err(e.code(), msg, Some(d.into()))
        }
        _ => err(e.code(), msg, None),
    }
}
