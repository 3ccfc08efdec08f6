//! Waypoint paths.
//!
//! A `Path` is an ordered waypoint list with a forward-only cursor. Crossing
//! a trigger waypoint and running off the end produce [`PathEvent`]s, which
//! collect in an outbox until the owning system drains them with
//! [`Path::take_events`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathEvent {
    /// The cursor crossed a trigger waypoint (zero-based index).
    Trigger(usize),
    /// The waypoint list was found exhausted.
    End,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Vector2>,
    triggers: BTreeSet<usize>,
    cursor: usize,
    end_fired: bool,
    #[serde(skip)]
    events: Vec<PathEvent>,
}

impl Path {
    pub fn new(points: Vec<Vector2>, triggers: impl IntoIterator<Item = usize>) -> Self {
        Self {
            points,
            triggers: triggers.into_iter().collect(),
            cursor: 0,
            end_fired: false,
            events: Vec::new(),
        }
    }

    /// Straight two-point path.
    pub fn between(from: Vector2, to: Vector2) -> Self {
        Self::new(vec![from, to], [])
    }

    /// Step the cursor past the current waypoint, reporting a trigger if the
    /// waypoint carries one. No-op once exhausted.
    pub fn advance(&mut self) {
        if self.cursor >= self.points.len() {
            return;
        }
        if self.triggers.contains(&self.cursor) {
            self.events.push(PathEvent::Trigger(self.cursor));
        }
        self.cursor += 1;
    }

    /// Waypoint at the cursor, or `None` once exhausted. The first call to
    /// observe exhaustion reports `End`; later calls stay silent.
    pub fn current_point(&mut self) -> Option<Vector2> {
        match self.points.get(self.cursor) {
            Some(point) => Some(*point),
            None => {
                if !self.end_fired {
                    self.end_fired = true;
                    self.events.push(PathEvent::End);
                }
                None
            }
        }
    }

    /// Append a waypoint. A path that already ended may end again after
    /// running through the new point.
    pub fn add_point(&mut self, point: Vector2, has_trigger: bool) {
        if has_trigger {
            self.triggers.insert(self.points.len());
        }
        self.points.push(point);
        self.end_fired = false;
    }

    /// Replace the final waypoint with `point`. An empty path is seeded
    /// with `origin` then `point`.
    pub fn set_destination(&mut self, origin: Vector2, point: Vector2) {
        match self.points.last_mut() {
            Some(last) => *last = point,
            None => {
                self.points.push(origin);
                self.points.push(point);
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.points.len()
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    pub fn is_trigger(&self, index: usize) -> bool {
        self.triggers.contains(&index)
    }

    pub fn destination(&self) -> Option<Vector2> {
        self.points.last().copied()
    }

    /// Direction of the final segment, if the path has one.
    pub fn final_heading(&self) -> Option<Vector2> {
        match self.points.as_slice() {
            [.., a, b] => Some((*b - *a).normalize_or_zero()),
            _ => None,
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<PathEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn advance_reports_triggers_in_order() {
        let mut path = Path::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)], [0, 2]);
        path.advance();
        path.advance();
        path.advance();
        assert_eq!(
            path.take_events(),
            vec![PathEvent::Trigger(0), PathEvent::Trigger(2)]
        );
        assert!(path.is_exhausted());
    }

    #[test]
    fn cursor_never_moves_backward() {
        let mut path = Path::new(vec![v(0.0, 0.0), v(1.0, 0.0)], []);
        let mut last = path.cursor();
        for _ in 0..5 {
            path.advance();
            assert!(path.cursor() >= last);
            last = path.cursor();
        }
        assert_eq!(path.cursor(), 2);
    }

    #[test]
    fn end_fires_once() {
        let mut path = Path::between(v(0.0, 0.0), v(0.0, 1.0));
        path.advance();
        path.advance();
        for _ in 0..4 {
            assert_eq!(path.current_point(), None);
        }
        assert_eq!(path.take_events(), vec![PathEvent::End]);
    }

    #[test]
    fn add_point_rearms_end() {
        let mut path = Path::between(v(0.0, 0.0), v(0.0, 1.0));
        path.advance();
        path.advance();
        assert_eq!(path.current_point(), None);
        path.add_point(v(5.0, 5.0), true);
        assert_eq!(path.current_point(), Some(v(5.0, 5.0)));
        path.advance();
        assert_eq!(path.current_point(), None);
        assert_eq!(
            path.take_events(),
            vec![PathEvent::End, PathEvent::Trigger(2), PathEvent::End]
        );
    }

    #[test]
    fn set_destination_replaces_last_point() {
        let mut path = Path::between(v(0.0, 0.0), v(10.0, 10.0));
        path.advance();
        path.set_destination(v(99.0, 99.0), v(20.0, 5.0));
        assert_eq!(path.current_point(), Some(v(20.0, 5.0)));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn set_destination_seeds_empty_path() {
        let mut path = Path::default();
        path.set_destination(v(1.0, 2.0), v(3.0, 4.0));
        assert_eq!(path.points(), &[v(1.0, 2.0), v(3.0, 4.0)]);
    }

    #[test]
    fn final_heading_uses_last_segment() {
        let path = Path::new(vec![v(0.0, 0.0), v(0.0, 10.0), v(10.0, 10.0)], []);
        assert_eq!(path.final_heading(), Some(v(1.0, 0.0)));
        assert_eq!(Path::default().final_heading(), None);
    }
}
