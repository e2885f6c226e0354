//! Hit-test registry.
//!
//! One [`HitTestStrategy`] per [`ShapeKind`]. Strategies receive the registry so
//! composite shapes can resolve their children's strategies by kind. The builder
//! refuses to produce a registry with a missing or doubled kind, so lookups at
//! hit-test time never fail.

mod strategies;

pub use strategies::{
    CubicBezierHitTest, EllipseHitTest, GroupHitTest, LineHitTest, PathHitTest, PointHitTest,
    QuadraticBezierHitTest, RectangleHitTest, ScribbleHitTest,
};

use std::collections::HashMap;

use kurbo::{Point, Rect};
use thiserror::Error;

use crate::points::{PointArena, PointId};
use crate::shapes::{Shape, ShapeKind};

/// Registry configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HitTestError {
    #[error("No hit-test strategy registered for {0:?}")]
    Unregistered(ShapeKind),
    #[error("Hit-test strategy registered twice for {0:?}")]
    Duplicate(ShapeKind),
}

/// Hit-testing for one shape kind.
pub trait HitTestStrategy {
    /// The kind this strategy handles.
    fn kind(&self) -> ShapeKind;

    /// First point of `shape` within `radius` of `target`, skipping `exclude`.
    fn try_get_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
        registry: &HitTest,
    ) -> Option<PointId>;

    /// Whether the body of `shape` lies within `radius` of `target`.
    fn contains(&self, shape: &Shape, points: &PointArena, target: Point, radius: f64, registry: &HitTest) -> bool;

    /// Whether `shape` intersects `rect` grown by `radius`.
    fn overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64, registry: &HitTest) -> bool;
}

/// Collects strategies and validates that every kind is covered exactly once.
#[derive(Default)]
pub struct HitTestBuilder {
    strategies: Vec<Box<dyn HitTestStrategy>>,
}

impl HitTestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, strategy: impl HitTestStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn build(self) -> Result<HitTest, HitTestError> {
        let mut strategies = HashMap::new();
        for strategy in self.strategies {
            let kind = strategy.kind();
            if strategies.insert(kind, strategy).is_some() {
                return Err(HitTestError::Duplicate(kind));
            }
        }
        if let Some(kind) = ShapeKind::ALL.iter().find(|k| !strategies.contains_key(k)) {
            return Err(HitTestError::Unregistered(*kind));
        }
        Ok(HitTest { strategies })
    }
}

/// A validated registry covering every shape kind.
pub struct HitTest {
    strategies: HashMap<ShapeKind, Box<dyn HitTestStrategy>>,
}

impl std::fmt::Debug for HitTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitTest")
            .field("kinds", &self.strategies.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for HitTest {
    fn default() -> Self {
        Self::standard()
    }
}

impl HitTest {
    /// Builder preloaded with the strategy for every built-in kind.
    pub fn standard_builder() -> HitTestBuilder {
        HitTestBuilder::new()
            .register(PointHitTest)
            .register(LineHitTest)
            .register(CubicBezierHitTest)
            .register(QuadraticBezierHitTest)
            .register(PathHitTest)
            .register(RectangleHitTest)
            .register(EllipseHitTest)
            .register(ScribbleHitTest)
            .register(GroupHitTest)
    }

    /// Registry with the built-in strategies.
    ///
    /// Panics if the built-in set fails validation, which is a startup
    /// configuration error.
    pub fn standard() -> Self {
        Self::standard_builder()
            .build()
            .expect("built-in hit-test strategies cover every shape kind once")
    }

    fn strategy(&self, kind: ShapeKind) -> &dyn HitTestStrategy {
        self.strategies[&kind].as_ref()
    }

    /// First point in `shapes` (in order) within `radius` of `target`.
    pub fn try_get_point(&self, shapes: &[Shape], points: &PointArena, target: Point, radius: f64) -> Option<PointId> {
        self.try_get_point_excluding(shapes, points, target, radius, None)
    }

    /// As [`HitTest::try_get_point`], never returning `exclude`.
    pub fn try_get_point_excluding(
        &self,
        shapes: &[Shape],
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
    ) -> Option<PointId> {
        shapes
            .iter()
            .find_map(|shape| self.shape_point(shape, points, target, radius, exclude))
    }

    /// Point lookup within a single shape.
    pub fn shape_point(
        &self,
        shape: &Shape,
        points: &PointArena,
        target: Point,
        radius: f64,
        exclude: Option<PointId>,
    ) -> Option<PointId> {
        self.strategy(shape.kind())
            .try_get_point(shape, points, target, radius, exclude, self)
    }

    /// Returns `shape` when its body lies within `radius` of `target`.
    pub fn contains<'a>(&self, shape: &'a Shape, points: &PointArena, target: Point, radius: f64) -> Option<&'a Shape> {
        self.strategy(shape.kind())
            .contains(shape, points, target, radius, self)
            .then_some(shape)
    }

    /// First shape in `shapes` whose body contains `target`.
    pub fn try_get_shape<'a>(&self, shapes: &'a [Shape], points: &PointArena, target: Point, radius: f64) -> Option<&'a Shape> {
        shapes
            .iter()
            .find_map(|shape| self.contains(shape, points, target, radius))
    }

    /// Whether a single shape intersects `rect`.
    pub fn shape_overlaps(&self, shape: &Shape, points: &PointArena, rect: Rect, radius: f64) -> bool {
        self.strategy(shape.kind())
            .overlaps(shape, points, rect.abs(), radius, self)
    }

    /// Every top-level shape intersecting `rect`, in container order.
    pub fn overlaps<'a>(&self, shapes: &'a [Shape], points: &PointArena, rect: Rect, radius: f64) -> Vec<&'a Shape> {
        shapes
            .iter()
            .filter(|shape| self.shape_overlaps(shape, points, rect, radius))
            .collect()
    }
}
