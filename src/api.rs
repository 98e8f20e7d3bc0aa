use crate::Polygon;
use crate::{error, interop, logging};
use curvepoly::{
    Constraint, Continuity, EditResult, EdgeType, EditorConfig, HandleEnd, Vec2,
};
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Send core log records to the browser console. `level` is one of
/// off, error, warn, info, debug, trace.
#[wasm_bindgen]
pub fn init_logging(level: &str) -> bool {
    match logging::level_from_str(level) {
        Some(l) => {
            logging::install(l);
            true
        }
        None => false,
    }
}

fn to_js<T: serde::Serialize>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

fn envelope<T>(r: EditResult<T>, f: impl FnOnce(T) -> JsValue) -> JsValue {
    match r {
        Ok(v) => error::ok(f(v)),
        Err(e) => error::from_edit(&e),
    }
}

fn config_from_js(cfg: JsValue) -> Result<EditorConfig, JsValue> {
    let val = serde_wasm_bindgen::from_value::<serde_json::Value>(cfg)
        .map_err(|e| error::err("invalid_config", e.to_string(), None))?;
    EditorConfig::from_json_value(val).map_err(|e| error::from_edit(&e))
}

fn points_from_flat(coords: &[f64]) -> Result<Vec<Vec2>, JsValue> {
    if coords.len() % 2 != 0 {
        return Err(error::err(
            "invalid_points",
            "coordinates must come in x, y pairs",
            None,
        ));
    }
    Ok(coords.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect())
}

fn handle_end(end: u8) -> Result<HandleEnd, JsValue> {
    HandleEnd::from_u8(end).ok_or_else(|| error::invalid_code("end", end, "0:Start or 1:End"))
}

fn continuity(kind: u8) -> Result<Continuity, JsValue> {
    Continuity::from_u8(kind).ok_or_else(|| error::invalid_code("kind", kind, "0:G0, 1:G1, 2:C1"))
}

fn edge_type(kind: u8) -> Result<EdgeType, JsValue> {
    EdgeType::from_u8(kind).ok_or_else(|| error::invalid_code("kind", kind, "0:Line, 1:Bezier, 2:Arc"))
}

fn constraint(kind: u8, value: f64) -> Result<Constraint, JsValue> {
    Constraint::from_code(kind, value).ok_or_else(|| {
        error::invalid_code("kind", kind, "0:None, 1:Vertical, 2:Diagonal45, 3:FixedLength")
    })
}

#[wasm_bindgen]
impl Polygon {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Polygon {
        crate::Polygon::rs_new()
    }
    /// Starter triangle with a custom config object, e.g. `{ handle_ratio: 0.25 }`.
    pub fn with_config(cfg: JsValue) -> Result<Polygon, JsValue> {
        let config = config_from_js(cfg)?;
        curvepoly::Polygon::with_config(config)
            .map(|inner| Polygon { inner })
            .map_err(|e| error::from_edit(&e))
    }
    /// Closed polygon of Line edges through flat `[x0, y0, x1, y1, ...]`.
    pub fn from_points(coords: &[f64]) -> Result<Polygon, JsValue> {
        let pts = points_from_flat(coords)?;
        curvepoly::Polygon::from_points(&pts, EditorConfig::default())
            .map(|inner| Polygon { inner })
            .map_err(|e| error::from_edit(&e))
    }
    pub fn set_config_res(&mut self, cfg: JsValue) -> JsValue {
        match config_from_js(cfg) {
            Ok(c) => envelope(self.inner.set_config(c), |_| JsValue::UNDEFINED),
            Err(e) => e,
        }
    }
    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }
    pub fn geom_version(&self) -> u64 {
        self.rs_geom_version()
    }
    pub fn vertex_count(&self) -> u32 {
        self.inner.vertex_count() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.edge_count() as u32
    }

    // Reads

    pub fn get_vertex(&self, id: u32) -> JsValue {
        match self.inner.vertex_position(id) {
            Some(p) => interop::point(p.x, p.y),
            None => JsValue::NULL,
        }
    }
    pub fn get_vertex_res(&self, id: u32) -> JsValue {
        match self.inner.vertex_position(id) {
            Some(p) => error::ok(interop::point(p.x, p.y)),
            None => error::invalid_id("vertex", id),
        }
    }
    pub fn vertex_continuity(&self, id: u32) -> Option<u8> {
        self.inner.vertex_continuity(id).map(|c| c as u8)
    }
    pub fn edge_type(&self, id: u32) -> Option<u8> {
        self.inner.edge_type(id).map(|t| t as u8)
    }
    pub fn edge_length(&self, id: u32) -> Option<f64> {
        self.inner.edge_length(id)
    }
    /// `{ kind, value }` with the numeric constraint code.
    pub fn get_edge_constraint(&self, id: u32) -> JsValue {
        match self.inner.edge_constraint(id) {
            Some(c) => {
                let obj = interop::new_obj();
                interop::set_kv(&obj, "kind", &JsValue::from_f64(c.code() as f64));
                interop::set_kv(&obj, "value", &c.value().map_or(JsValue::NULL, JsValue::from_f64));
                obj.into()
            }
            None => JsValue::NULL,
        }
    }
    /// Line: p1, p2. Bezier: p0..p3. Arc: center, radius, angles, sweep, orientation.
    pub fn get_edge_geometry(&self, id: u32) -> JsValue {
        match self.inner.edge_geometry(id) {
            Some(g) => to_js(&g),
            None => JsValue::NULL,
        }
    }
    pub fn get_edge_geometry_res(&self, id: u32) -> JsValue {
        match self.inner.edge_geometry(id) {
            Some(g) => error::ok(to_js(&g)),
            None => error::invalid_id("edge", id),
        }
    }

    // Typed arrays getters
    pub fn get_vertex_data(&self) -> JsValue {
        let (ids, pos) = self.inner.get_vertex_arrays();
        let obj = interop::new_obj();
        interop::set_kv(&obj, "ids", &interop::arr_u32(&ids).into());
        interop::set_kv(&obj, "positions", &interop::arr_f64(&pos).into());
        interop::set_kv(
            &obj,
            "continuity",
            &interop::arr_u8(&self.inner.get_continuity_array()).into(),
        );
        obj.into()
    }
    pub fn get_edge_data(&self) -> JsValue {
        let ea = self.inner.get_edge_arrays();
        let obj = interop::new_obj();
        interop::set_kv(&obj, "ids", &interop::arr_u32(&ea.ids).into());
        interop::set_kv(&obj, "endpoints", &interop::arr_u32(&ea.endpoints).into());
        interop::set_kv(&obj, "kinds", &interop::arr_u8(&ea.kinds).into());
        interop::set_kv(
            &obj,
            "constraint_kinds",
            &interop::arr_u8(&ea.constraint_kinds).into(),
        );
        interop::set_kv(
            &obj,
            "constraint_values",
            &interop::arr_f64(&ea.constraint_values).into(),
        );
        obj.into()
    }
    pub fn snapshot(&self) -> JsValue {
        to_js(&self.inner.snapshot())
    }
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.inner.snapshot()).unwrap_or_default()
    }

    // Edits

    pub fn move_vertex(&mut self, id: u32, x: f64, y: f64) -> bool {
        self.inner.move_vertex(id, Vec2::new(x, y)).is_ok()
    }
    pub fn move_vertex_res(&mut self, id: u32, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        envelope(self.inner.move_vertex(id, Vec2::new(x, y)), |_| JsValue::TRUE)
    }
    pub fn move_control_point(&mut self, edge: u32, end: u8, x: f64, y: f64) -> bool {
        match HandleEnd::from_u8(end) {
            Some(end) => self.inner.move_control_point(edge, end, Vec2::new(x, y)).is_ok(),
            None => false,
        }
    }
    pub fn move_control_point_res(&mut self, edge: u32, end: u8, x: f64, y: f64) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        let end = match handle_end(end) {
            Ok(e) => e,
            Err(e) => return e,
        };
        envelope(
            self.inner.move_control_point(edge, end, Vec2::new(x, y)),
            |_| JsValue::TRUE,
        )
    }
    pub fn set_edge_constraint(&mut self, edge: u32, kind: u8, value: f64) -> bool {
        match Constraint::from_code(kind, value) {
            Some(c) => self.inner.set_edge_constraint(edge, c).is_ok(),
            None => false,
        }
    }
    pub fn set_edge_constraint_res(&mut self, edge: u32, kind: u8, value: f64) -> JsValue {
        let c = match constraint(kind, value) {
            Ok(c) => c,
            Err(e) => return e,
        };
        envelope(self.inner.set_edge_constraint(edge, c), |_| JsValue::TRUE)
    }
    pub fn set_vertex_continuity(&mut self, id: u32, kind: u8) -> bool {
        match Continuity::from_u8(kind) {
            Some(c) => self.inner.set_vertex_continuity(id, c).is_ok(),
            None => false,
        }
    }
    pub fn set_vertex_continuity_res(&mut self, id: u32, kind: u8) -> JsValue {
        let c = match continuity(kind) {
            Ok(c) => c,
            Err(e) => return e,
        };
        envelope(self.inner.set_vertex_continuity(id, c), |_| JsValue::TRUE)
    }
    pub fn convert_edge(&mut self, edge: u32, kind: u8) -> bool {
        match EdgeType::from_u8(kind) {
            Some(t) => self.inner.convert_edge(edge, t).is_ok(),
            None => false,
        }
    }
    pub fn convert_edge_res(&mut self, edge: u32, kind: u8) -> JsValue {
        let t = match edge_type(kind) {
            Ok(t) => t,
            Err(e) => return e,
        };
        envelope(self.inner.convert_edge(edge, t), |_| JsValue::TRUE)
    }
    pub fn insert_vertex_on_edge(&mut self, edge: u32) -> Option<u32> {
        self.inner.insert_vertex_on_edge(edge).ok()
    }
    pub fn insert_vertex_on_edge_res(&mut self, edge: u32) -> JsValue {
        envelope(self.inner.insert_vertex_on_edge(edge), |v| {
            JsValue::from_f64(v as f64)
        })
    }
    pub fn delete_vertex(&mut self, id: u32) -> bool {
        self.inner.delete_vertex(id).is_ok()
    }
    pub fn delete_vertex_res(&mut self, id: u32) -> JsValue {
        envelope(self.inner.delete_vertex(id), |_| JsValue::TRUE)
    }
    pub fn translate(&mut self, dx: f64, dy: f64) -> bool {
        self.inner.translate(Vec2::new(dx, dy)).is_ok()
    }
    pub fn translate_res(&mut self, dx: f64, dy: f64) -> JsValue {
        if !dx.is_finite() {
            return error::non_finite("dx");
        }
        if !dy.is_finite() {
            return error::non_finite("dy");
        }
        envelope(self.inner.translate(Vec2::new(dx, dy)), |_| JsValue::TRUE)
    }
}
