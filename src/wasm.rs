use crate::bounds::BoundingBox;
use crate::kdtree::KdTree;
use crate::layout::DisplayCoord;
use crate::point::Point;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// WASM wrapper around [`KdTree`] feeding the browser viewer.
///
/// Diagram coordinates are handed out as `[rank, y]` pairs with `y` already
/// negated, so they can be plotted directly.
#[wasm_bindgen(js_name = KdTree3D)]
pub struct KdTree3D {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree3D)]
impl KdTree3D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> KdTree3D {
        KdTree3D { inner: KdTree::new() }
    }

    #[wasm_bindgen(js_name = withExtent)]
    pub fn with_extent(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> KdTree3D {
        let extent = BoundingBox::new([min_x, min_y, min_z], [max_x, max_y, max_z]);
        KdTree3D { inner: KdTree::with_extent(extent) }
    }

    /// The demonstration tree.
    pub fn sample() -> KdTree3D {
        KdTree3D { inner: KdTree::sample() }
    }

    pub fn add(&mut self, x: f64, y: f64, z: f64) -> Result<bool, JsError> {
        Ok(self.inner.add([x, y, z])?)
    }

    /// Inserts a flat `[x0, y0, z0, x1, ...]` buffer in order.
    #[wasm_bindgen(js_name = addPoints)]
    pub fn add_points(&mut self, points: &[f64]) -> Result<usize, JsError> {
        if points.len() % 3 != 0 {
            return Err(JsError::new("point buffer length must be a multiple of 3"));
        }
        let points = points.chunks_exact(3).map(|c| [c[0], c[1], c[2]]);
        Ok(self.inner.extend(points)?)
    }

    #[wasm_bindgen(js_name = randomPoints)]
    pub fn random_points(&mut self, count: usize) -> usize {
        self.inner.random_points(count)
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    /// Points in inorder as a flat buffer.
    #[wasm_bindgen(getter)]
    pub fn inorder(&self) -> Vec<f64> {
        self.inner.inorder().into_iter().flatten().collect()
    }

    /// `{ found, path }` where `path` holds `[coord, point, distance]` from the root down.
    pub fn find(&self, x: f64, y: f64, z: f64) -> Result<Object, JsError> {
        let lookup = self.inner.find([x, y, z])?;
        let path = Array::new();
        for (coord, step) in lookup.descent() {
            path.push(&Array::of3(&coord_array(coord), &point_array(&step.point), &step.distance.into()));
        }
        let result = Object::new();
        set(&result, "found", &lookup.found.into());
        set(&result, "path", &path);
        Ok(result)
    }

    /// `{ neighbors, centerFound, trace, membership }` for the animation layer.
    #[wasm_bindgen(js_name = sphereNeighbors)]
    pub fn sphere_neighbors(&self, x: f64, y: f64, z: f64, radius: f64) -> Result<Object, JsError> {
        let query = self.inner.find_sphere_neighbors([x, y, z], radius)?;

        let neighbors: Array = query.neighbors.iter().map(point_array).collect();
        let trace: Array = query
            .trace
            .iter()
            .map(|step| Array::of2(&coord_array(step.coord), &point_array(&step.point)))
            .collect();
        let membership: Array = query
            .membership
            .iter()
            .map(|m| m.map_or(JsValue::NULL, |c| coord_array(c).into()))
            .collect();

        let result = Object::new();
        set(&result, "neighbors", &neighbors);
        set(&result, "centerFound", &query.center_found.into());
        set(&result, "trace", &trace);
        set(&result, "membership", &membership);
        Ok(result)
    }

    /// Splitting planes in preorder as `{ point, axis, corners }`.
    pub fn barriers(&self) -> Array {
        self.inner
            .barriers()
            .iter()
            .map(|b| {
                let obj = Object::new();
                let corners: Array = b.corners().iter().map(point_array).collect();
                set(&obj, "point", &point_array(&b.point));
                set(&obj, "axis", &JsValue::from_str(&b.axis.to_string()));
                set(&obj, "corners", &corners);
                obj
            })
            .collect()
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsError> {
        Ok(self.inner.to_json()?)
    }
}

impl Default for KdTree3D {
    fn default() -> Self {
        Self::new()
    }
}

fn point_array(p: &Point) -> Array {
    Array::of3(&p[0].into(), &p[1].into(), &p[2].into())
}

fn coord_array(c: DisplayCoord) -> Array {
    Array::of2(&c.x().into(), &c.y().into())
}

fn set(target: &Object, key: &str, value: &JsValue) {
    // Setting a plain data property on a fresh object cannot fail.
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}
