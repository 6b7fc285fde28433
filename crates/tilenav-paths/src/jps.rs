//! Jump Point Search.
//!
//! Instead of expanding every neighbour, each open node scans straight and
//! diagonal runs in the directions it carries and only inserts the *jump
//! points* where those runs end: cells next to an obstacle corner, the goal,
//! or the depth horizon. Under a depth limit a run also stops where it comes
//! closest to the goal, so a search cut short still has partial progress to
//! report. A jump point carries the directions it still has to scan.
//!
//! In 4-directional mode a straight scan branches: at every cell it scans
//! both perpendiculars, and a side scan that finds a jump point is returned
//! as a second frontier candidate whose parent is the cell the side scan
//! started from. When a scan stops for any other reason it pads the jump
//! point's direction set with the perpendiculars it did not scan.

use std::f64::consts::SQRT_2;

use tilenav_core::{Direction, Point};

use crate::PathEngine;
use crate::config::Movement;
use crate::node::{Budget, ClosedSet, NodeStore, OpenSet, Outcome, SearchNode};
use crate::trace::TraceRecorder;
use crate::traits::GridAdapter;

/// Distance to the goal under which scans ignore passability.
const GOAL_REACH: f64 = 1.3;

/// A jump point found by a scan, not yet in the node store.
#[derive(Clone, Debug, PartialEq)]
struct Jump {
    pos: Point,
    /// Direction of the run that ended here.
    via: Direction,
    g: f64,
    dirs: Vec<Direction>,
}

/// Result of one scan: the jump point on the scanned run and, for branching
/// scans, a second one found perpendicular to it.
#[derive(Clone, Debug, PartialEq)]
struct ScanHit {
    primary: Jump,
    branch: Option<Jump>,
}

impl ScanHit {
    fn single(primary: Jump) -> Self {
        Self {
            primary,
            branch: None,
        }
    }
}

struct Scanner<'a, G: ?Sized> {
    grid: &'a G,
    goal: Point,
    movement: Movement,
    budget: Budget,
}

impl<G> Scanner<'_, G>
where
    G: GridAdapter + ?Sized,
{
    fn remaining(&self, p: Point) -> f64 {
        self.grid.distance(p, self.goal, self.movement)
    }

    fn node(&self, parent: usize, jump: Jump) -> SearchNode {
        SearchNode {
            dirs: jump.dirs,
            ..SearchNode::child(parent, jump.via, jump.pos, jump.g, self.remaining(jump.pos))
        }
    }

    /// Jump point on `pos`, the last cell a run reached, when the budget
    /// leaves no room for another `step` from it. `allowed` is false for
    /// runs that may not end on a horizon or have not moved yet.
    fn horizon(
        &self,
        pos: Point,
        via: Direction,
        g: f64,
        step: f64,
        allowed: bool,
    ) -> Option<ScanHit> {
        (allowed && self.budget.exceeded_by(g + step)).then(|| {
            ScanHit::single(Jump {
                pos,
                via,
                g,
                dirs: vec![via],
            })
        })
    }

    /// Whether `p1` is the closest a run along `dir` comes to the goal. Only
    /// depth-limited searches stop there, so a run that passes the goal's row
    /// or column still leaves a node to fall back on.
    fn nearest_on_run(&self, p0: Point, p1: Point, dir: Direction) -> bool {
        if self.budget.limit().is_none() {
            return false;
        }
        let r1 = self.remaining(p1);
        r1 < self.remaining(p0) && self.remaining(self.grid.step(p1, dir)) >= r1
    }

    /// Scan from `origin` along the orthogonal `dir`.
    ///
    /// With `horizon` set, a run that the depth limit stops, or that dead-ends
    /// where no further step is affordable, ends on a jump point at its last
    /// cell. Under a depth limit it also stops where it passes closest to the
    /// goal. Side scans inherit the flag, so one cut by the limit still
    /// yields a branch.
    fn straight(
        &self,
        origin: Point,
        g0: f64,
        dir: Direction,
        branching: bool,
        horizon: bool,
    ) -> Option<ScanHit> {
        let sides = dir.perpendiculars();
        let extent = if dir.is_horizontal() {
            self.grid.width()
        } else {
            self.grid.height()
        };

        let (mut p0, mut g) = (origin, g0);
        let mut steps = 0;
        loop {
            let stop = horizon && steps > 0;
            if !self.grid.passable(p0, dir) && self.remaining(p0) > GOAL_REACH {
                return self.horizon(p0, dir, g, 1.0, stop);
            }
            let p1 = self.grid.step(p0, dir);
            if !self.grid.contains(p1) {
                return self.horizon(p0, dir, g, 1.0, stop);
            }
            let g1 = g + 1.0;
            if self.budget.exceeded_by(g1) {
                return self.horizon(p0, dir, g, 1.0, stop);
            }
            steps += 1;
            if steps > extent {
                return None;
            }

            let jump = |dirs| Jump {
                pos: p1,
                via: dir,
                g: g1,
                dirs,
            };
            if p1 == self.goal {
                return Some(ScanHit::single(jump(Vec::new())));
            }

            let mut dirs = vec![dir];
            match self.movement {
                Movement::Eight => {
                    let r1 = self.remaining(p1);
                    for side in sides {
                        let Some(diag) = diagonal_of(dir, side) else {
                            continue;
                        };
                        if !self.grid.passable(p1, side)
                            && self.grid.can_move(p1, diag)
                            && r1 > GOAL_REACH
                        {
                            dirs.push(diag);
                        }
                    }
                    for side in sides {
                        if !self.grid.passable(p1, side) && r1 < GOAL_REACH {
                            dirs.push(side);
                        }
                    }
                }
                Movement::Four => {
                    let r0 = self.remaining(p0);
                    for side in sides {
                        if !self.grid.passable(p0, side)
                            && self.grid.passable(p1, side)
                            && r0 > GOAL_REACH
                        {
                            dirs.push(side);
                        }
                    }
                }
            }

            if !branching {
                if dirs.len() > 1 {
                    return Some(ScanHit::single(jump(dirs)));
                }
            } else {
                let mut scanned = [false; 2];
                let mut branch = None;
                for (i, &side) in sides.iter().enumerate() {
                    if dirs.len() == 1 && branch.is_none() {
                        scanned[i] = true;
                        branch = self
                            .straight(p1, g1, side, false, horizon)
                            .map(|hit| hit.primary);
                    }
                }
                if dirs.len() * (1 + usize::from(branch.is_some())) > 1 {
                    for (i, &side) in sides.iter().enumerate() {
                        if dirs.len() == 1 && !scanned[i] {
                            dirs.push(side);
                        }
                    }
                    return Some(ScanHit {
                        primary: jump(dirs),
                        branch,
                    });
                }
            }
            if horizon && self.nearest_on_run(p0, p1, dir) {
                if !branching {
                    dirs.extend(sides);
                }
                return Some(ScanHit::single(jump(dirs)));
            }

            p0 = p1;
            g = g1;
        }
    }

    /// Scan from `origin` along the diagonal made of `horz` and `vert`,
    /// scanning along both component directions at every cell.
    fn diagonal(
        &self,
        origin: Point,
        g0: f64,
        horz: Direction,
        vert: Direction,
        horizon: bool,
    ) -> Option<ScanHit> {
        let dir = Direction::combine(horz, vert)?;
        let cap = lcm(self.grid.width(), self.grid.height());

        let (mut p0, mut g) = (origin, g0);
        let mut steps = 0;
        loop {
            let stop = horizon && steps > 0;
            if !self.grid.passable_diagonally(p0, horz, vert) && self.remaining(p0) > GOAL_REACH {
                return self.horizon(p0, dir, g, SQRT_2, stop);
            }
            let p1 = self.grid.step(p0, dir);
            if !self.grid.contains(p1) {
                return self.horizon(p0, dir, g, SQRT_2, stop);
            }
            let g1 = g + SQRT_2;
            if self.budget.exceeded_by(g1) {
                return self.horizon(p0, dir, g, SQRT_2, stop);
            }
            steps += 1;
            if steps > cap {
                return None;
            }

            let jump = |dirs| Jump {
                pos: p1,
                via: dir,
                g: g1,
                dirs,
            };
            if p1 == self.goal {
                return Some(ScanHit::single(jump(Vec::new())));
            }

            let mut dirs = vec![dir];
            let r1 = self.remaining(p1);
            let back_h = horz.reverse();
            let back_v = vert.reverse();
            if !self.grid.passable(p1, back_h)
                && self.grid.passable_diagonally(p1, back_h, vert)
                && r1 > GOAL_REACH
            {
                dirs.extend(Direction::combine(back_h, vert));
            }
            if !self.grid.passable(p1, back_v)
                && self.grid.passable_diagonally(p1, horz, back_v)
                && r1 > GOAL_REACH
            {
                dirs.extend(Direction::combine(horz, back_v));
            }

            let mut scanned = [false; 2];
            let mut branch = None;
            for (i, side) in [horz, vert].into_iter().enumerate() {
                if dirs.len() == 1 && branch.is_none() {
                    scanned[i] = true;
                    branch = self
                        .straight(p1, g1, side, false, horizon)
                        .map(|hit| hit.primary);
                }
            }
            if dirs.len() * (1 + usize::from(branch.is_some())) > 1 {
                if !scanned[0] {
                    dirs.push(horz);
                }
                if !scanned[1] {
                    dirs.push(vert);
                }
                return Some(ScanHit {
                    primary: jump(dirs),
                    branch,
                });
            }
            if horizon && self.nearest_on_run(p0, p1, dir) {
                return Some(ScanHit::single(jump(dirs)));
            }

            p0 = p1;
            g = g1;
        }
    }
}

/// The diagonal between an orthogonal move and one perpendicular to it.
fn diagonal_of(a: Direction, b: Direction) -> Option<Direction> {
    Direction::combine(a, b).or_else(|| Direction::combine(b, a))
}

fn gcd(a: i32, b: i32) -> i32 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

fn lcm(a: i32, b: i32) -> i32 {
    match gcd(a, b) {
        0 => 0,
        d => (a / d * b).abs(),
    }
}

impl PathEngine {
    pub(crate) fn jps_search<G>(
        &self,
        grid: &G,
        start: Point,
        goal: Point,
        trace: &mut TraceRecorder,
    ) -> Outcome
    where
        G: GridAdapter + ?Sized,
    {
        let movement = self.config.movement;
        let scanner = Scanner {
            grid,
            goal,
            movement,
            budget: self.config.budget(),
        };
        let branching = movement == Movement::Four;

        let mut nodes = NodeStore::new();
        let mut open = OpenSet::new();
        let mut closed = ClosedSet::default();

        let root = nodes.push(SearchNode {
            dirs: movement.directions().to_vec(),
            ..SearchNode::root(start, scanner.remaining(start))
        });
        open.put(grid.index(start), root);
        let mut best = root;

        while let Some((cell, slot)) = open.extract_min(&nodes, SearchNode::f) {
            closed.insert(cell);
            let (pos, g) = (nodes[slot].pos, nodes[slot].g);
            trace.record_explored(pos);

            if pos == goal {
                best = slot;
                break;
            }
            if scanner.budget.exhausted_at(g) {
                continue;
            }

            let dirs = nodes[slot].dirs.clone();
            for dir in dirs {
                if !movement.allows(dir) {
                    continue;
                }
                let hit = match dir.components() {
                    Some((horz, vert)) => scanner.diagonal(pos, g, horz, vert, true),
                    None => scanner.straight(pos, g, dir, branching, true),
                };
                let Some(ScanHit { primary, branch }) = hit else {
                    continue;
                };

                // The primary is stored even when it is not admitted, since
                // a branch hangs off it.
                let primary_slot = nodes.push(scanner.node(slot, primary));
                let mut found = vec![primary_slot];
                if let Some(b) = branch {
                    found.push(nodes.push(scanner.node(primary_slot, b)));
                }

                for jp in found {
                    let jp_cell = grid.index(nodes[jp].pos);
                    if closed.contains(jp_cell) || !open.admits(jp_cell, nodes[jp].g, &nodes) {
                        continue;
                    }
                    let replaced = open.get(jp_cell);
                    open.put(jp_cell, jp);
                    if replaced == Some(best) || nodes[jp].h < nodes[best].h {
                        best = jp;
                    }
                }
            }
        }

        Outcome {
            nodes,
            terminal: Some(best),
            sparse: true,
        }
    }
}
