//! The incremental, budget-bounded reverse BFS engine.

use indexmap::IndexSet;

use wayfield_channel::{
    ChannelLayout, PageAllocator, PageGrant, PageMetadata, PathRecord, ResultPublisher,
    ResultReader,
};
use wayfield_core::tile::SCAN_ORDER;
use wayfield_core::{
    HostClock, Landmarks, PageId, Priority, SharedChannel, TerrainClass, TerrainSensor, TickId,
    Tile,
};
use wayfield_map::TerrainOracle;

use crate::error::NavError;
use crate::frontier::{FrontierRings, DIAGONAL_TENTHS, ORTHOGONAL_TENTHS};

/// What an agent wants a path toward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavTarget {
    /// A single destination tile, in logical coordinates.
    Tile(Tile),
    /// The enemy base and every known enemy structure at once; the
    /// expansion runs multi-source and each tile's record points at the
    /// nearest of them.
    EnemyStrongholds,
}

/// One tick's worth of pathfinding work, described by the caller.
#[derive(Clone, Debug)]
pub struct AdvanceRequest {
    /// Where to path toward.
    pub target: NavTarget,
    /// Lease priority; high may seize page 0 when the pool is hot.
    pub priority: Priority,
    /// Stop expanding once the host's remaining budget drops to this
    /// floor, leaving headroom for the agent's other work this tick.
    pub budget_floor: u32,
    /// Discard any in-progress or completed expansion state and
    /// recompute from scratch, e.g. after the caller learns the map or
    /// the seed set changed.
    pub restart: bool,
}

impl AdvanceRequest {
    /// A low-priority request with no budget floor.
    pub fn new(target: NavTarget) -> Self {
        Self {
            target,
            priority: Priority::Low,
            budget_floor: 0,
            restart: false,
        }
    }

    /// Set the lease priority.
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the budget floor.
    pub fn budget_floor(mut self, floor: u32) -> Self {
        self.budget_floor = floor;
        self
    }

    /// Force a frontier restart this tick.
    pub fn restart(mut self) -> Self {
        self.restart = true;
        self
    }
}

/// Outcome of one [`NavEngine::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStatus {
    /// A complete map for this destination exists (possibly from an
    /// earlier tick); no further work is needed until the map changes.
    Done,
    /// The expansion ran until the budget floor and was suspended; call
    /// again next tick to continue.
    InProgress,
    /// No page could be leased this tick. Nothing was computed; retry
    /// on a later tick.
    Declined,
}

/// The per-agent pathfinding engine.
///
/// Runs a reverse breadth-first expansion from the destination outward,
/// a slice per tick, publishing one next-hop record per visited tile
/// into a leased channel page. All expansion state (frontier, visited
/// set, terrain cache) lives in the agent; the channel holds only the
/// published results and the page metadata, so any teammate can consume
/// the path while only this agent can extend it.
pub struct NavEngine {
    layout: ChannelLayout,
    oracle: TerrainOracle,
    allocator: PageAllocator,
    frontier: FrontierRings,
    processed: Vec<bool>,
    contains_unknowns: bool,
    current_target: Option<NavTarget>,
}

impl NavEngine {
    /// Build an engine over a channel layout and a terrain oracle.
    ///
    /// The two must agree on the map dimensions; otherwise cell indices
    /// computed from one would be read back through the other.
    pub fn new(layout: ChannelLayout, oracle: TerrainOracle) -> Result<Self, NavError> {
        let window = (oracle.window().width(), oracle.window().height());
        let dims = (layout.map_width(), layout.map_height());
        if window != dims {
            return Err(NavError::WindowMismatch {
                window,
                layout: dims,
            });
        }
        let cells = layout.page_size();
        Ok(Self {
            layout,
            oracle,
            allocator: PageAllocator::new(),
            frontier: FrontierRings::with_capacity(cells),
            processed: vec![false; cells],
            contains_unknowns: false,
            current_target: None,
        })
    }

    /// The channel layout this engine publishes through.
    pub fn layout(&self) -> &ChannelLayout {
        &self.layout
    }

    /// The terrain oracle, including whatever it has cached so far.
    pub fn oracle(&self) -> &TerrainOracle {
        &self.oracle
    }

    /// A reader over the same layout, for consuming published paths.
    pub fn reader(&self) -> ResultReader<'_> {
        ResultReader::new(&self.layout)
    }

    /// Run one tick's slice of pathfinding toward `request.target`.
    ///
    /// Acquires (or resumes) a page lease, expands the frontier until
    /// quiescence or the budget floor, then commits the page metadata.
    /// A `restart` request recomputes even when a complete map for the
    /// destination already exists on the agent's own page.
    /// Channel failures never panic or abort the agent: acquisition
    /// failures decline the tick, and a failed metadata commit merely
    /// means next tick's lease check will not recognise the page and the
    /// work is redone.
    pub fn advance(
        &mut self,
        channel: &mut dyn SharedChannel,
        clock: &dyn HostClock,
        sensor: &dyn TerrainSensor,
        landmarks: &dyn Landmarks,
        request: &AdvanceRequest,
    ) -> AdvanceStatus {
        let now = clock.current_tick();
        let dest = self.wire_dest(&request.target, landmarks);

        let grant = match self
            .allocator
            .acquire(channel, &self.layout, now, dest, request.priority)
        {
            Ok(grant) => grant,
            Err(err) => {
                log::warn!("page acquisition failed at tick {now}: {err}");
                return AdvanceStatus::Declined;
            }
        };
        let page = match grant {
            PageGrant::AlreadyComplete(_) if !request.restart => return AdvanceStatus::Done,
            PageGrant::Declined => return AdvanceStatus::Declined,
            PageGrant::AlreadyComplete(page)
            | PageGrant::Resume(page)
            | PageGrant::Restart(page)
            | PageGrant::Fresh(page) => page,
        };

        let target_changed = self.current_target.as_ref() != Some(&request.target);
        // A fresh page granted while nothing is queued means the
        // previous expansion already ran to quiescence elsewhere;
        // committing over it as-is would stamp a finished page that
        // holds no records for this destination.
        let lost_finished_page =
            matches!(grant, PageGrant::Fresh(_)) && self.frontier.is_empty();
        if target_changed
            || request.restart
            || lost_finished_page
            || matches!(grant, PageGrant::Restart(_))
        {
            self.reseed(&request.target, landmarks);
            self.current_target = Some(request.target.clone());
        }

        let finished = self.expand(channel, clock, sensor, page, dest, request.budget_floor);
        self.commit(channel, page, now, dest, request.priority, finished);
        self.allocator.note_worked(page, dest, now);

        if finished {
            AdvanceStatus::Done
        } else {
            AdvanceStatus::InProgress
        }
    }

    /// The wrapped wire destination identifying this target in every
    /// published word. Multi-source expansions are identified by the
    /// enemy base.
    fn wire_dest(&self, target: &NavTarget, landmarks: &dyn Landmarks) -> (u8, u8) {
        match target {
            NavTarget::Tile(tile) => self.layout.wire_coords(*tile),
            NavTarget::EnemyStrongholds => self.layout.wire_coords(landmarks.enemy_base()),
        }
    }

    /// Reset expansion state and enqueue the zero-cost source tiles.
    fn reseed(&mut self, target: &NavTarget, landmarks: &dyn Landmarks) {
        self.frontier.reset();
        self.processed.fill(false);
        self.contains_unknowns = false;

        let mut seeds: IndexSet<(u8, u8)> = IndexSet::new();
        match target {
            NavTarget::Tile(tile) => {
                seeds.insert(self.layout.wire_coords(*tile));
            }
            NavTarget::EnemyStrongholds => {
                seeds.insert(self.layout.wire_coords(landmarks.enemy_base()));
                for structure in landmarks.enemy_structures() {
                    seeds.insert(self.layout.wire_coords(structure));
                }
            }
        }
        for (x, y) in seeds {
            let idx = self.cell(u32::from(x), u32::from(y));
            self.processed[idx] = true;
            self.frontier.push_seed(x, y);
        }
    }

    /// Expand until the frontier drains or the budget floor is reached.
    /// Returns whether quiescence was reached.
    fn expand(
        &mut self,
        channel: &mut dyn SharedChannel,
        clock: &dyn HostClock,
        sensor: &dyn TerrainSensor,
        page: PageId,
        dest: (u8, u8),
        budget_floor: u32,
    ) -> bool {
        let width = self.layout.map_width() as i32;
        let height = self.layout.map_height() as i32;
        loop {
            if clock.remaining_budget() <= budget_floor {
                return false;
            }
            let Some(entry) = self.frontier.pop() else {
                return true;
            };
            for dir in SCAN_ORDER {
                // The neighbour one step *against* `dir`: an agent there
                // moving in `dir` arrives on the popped tile, one step
                // closer to the destination.
                let (dx, dy) = dir.offset();
                let nx = (i32::from(entry.x) - dx).rem_euclid(width) as u32;
                let ny = (i32::from(entry.y) - dy).rem_euclid(height) as u32;
                let idx = self.cell(nx, ny);
                if self.processed[idx] {
                    continue;
                }
                let logical = self.oracle.window().translate(nx, ny);
                match self.oracle.classify(sensor, logical) {
                    TerrainClass::Unknown => {
                        // Left unprocessed so a later restart can reach
                        // it once it has been sensed.
                        self.contains_unknowns = true;
                    }
                    TerrainClass::Normal => {
                        self.processed[idx] = true;
                        let edge = if dir.is_diagonal() {
                            DIAGONAL_TENTHS
                        } else {
                            ORTHOGONAL_TENTHS
                        };
                        let record = PathRecord {
                            direction: dir,
                            cost: ((entry.cost_tenths + edge) / 10).min(255) as u8,
                            dest_x: dest.0,
                            dest_y: dest.1,
                        };
                        ResultPublisher::new(&self.layout, page)
                            .publish(channel, nx, ny, record);
                        self.frontier
                            .push_expanded(entry.cost_tenths, edge, nx as u8, ny as u8);
                    }
                    TerrainClass::Void | TerrainClass::OffMap => {
                        self.processed[idx] = true;
                    }
                }
            }
        }
    }

    /// Stamp the page metadata for this tick's work.
    fn commit(
        &self,
        channel: &mut dyn SharedChannel,
        page: PageId,
        now: TickId,
        dest: (u8, u8),
        priority: Priority,
        finished: bool,
    ) {
        let meta =
            PageMetadata::for_commit(now, dest, priority, finished, self.contains_unknowns);
        if let Err(err) = channel.write_cell(self.layout.metadata_index(page), meta.encode()) {
            log::warn!("metadata commit failed on page {page}: {err}");
        }
    }

    fn cell(&self, x: u32, y: u32) -> usize {
        x as usize * self.layout.map_height() as usize + y as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfield_channel::PageMetadata;
    use wayfield_core::{Direction, TerrainClass, Tile};
    use wayfield_map::{CoordinateWindow, SymmetryModel, TerrainOracle};
    use wayfield_test_utils::{ArrayChannel, AsciiMap, FakeClock, FixedLandmarks};

    const OPEN_5X5: &str = "
        .....
        .....
        .....
        .....
        .....
    ";

    fn engine_for(map: &AsciiMap) -> NavEngine {
        let layout = ChannelLayout::new(map.width(), map.height(), channel_capacity(map)).unwrap();
        // Asymmetric landmarks so every classification is a direct sense.
        let window =
            CoordinateWindow::new(map.width(), map.height(), Tile::new(0, 0)).unwrap();
        let symmetry = SymmetryModel::detect(
            Tile::new(0, 0),
            Tile::new(3, 2),
            &[Tile::new(1, 0)],
            &[Tile::new(1, 1)],
        );
        NavEngine::new(layout, TerrainOracle::new(window, symmetry)).unwrap()
    }

    fn channel_capacity(map: &AsciiMap) -> usize {
        (map.width() * map.height()) as usize * 5 + 5
    }

    fn landmarks() -> FixedLandmarks {
        FixedLandmarks::bases(Tile::new(0, 0), Tile::new(3, 2))
    }

    #[test]
    fn open_map_converges_and_publishes_next_hops() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(100);

        let request = AdvanceRequest::new(NavTarget::Tile(Tile::new(0, 0)));
        let status = engine.advance(&mut channel, &clock, &map, &landmarks(), &request);
        assert_eq!(status, AdvanceStatus::Done);

        // Every non-destination tile has a usable next hop.
        let reader = engine.reader();
        for x in 0..5 {
            for y in 0..5 {
                if (x, y) == (0, 0) {
                    continue;
                }
                let dir = reader.lookup(&channel, Tile::new(x, y), Tile::new(0, 0));
                assert!(dir.is_some(), "no record at ({x}, {y})");
            }
        }

        // The committed metadata advertises a complete page.
        let word = channel.cell(engine.layout().metadata_index(PageId(0)));
        let meta = PageMetadata::decode(word).unwrap();
        assert!(meta.is_complete());
        assert_eq!(meta.dest(), (0, 0));
        assert_eq!(meta.tick_stamp, 100);
    }

    #[test]
    fn adjacent_tile_points_straight_at_the_destination() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(7);

        let dest = Tile::new(2, 2);
        let request = AdvanceRequest::new(NavTarget::Tile(dest));
        engine.advance(&mut channel, &clock, &map, &landmarks(), &request);

        let reader = engine.reader();
        // From (2, 3), one step north lands on the destination.
        assert_eq!(
            reader.lookup(&channel, Tile::new(2, 3), dest),
            Some(Direction::North)
        );
        assert_eq!(
            reader.lookup(&channel, Tile::new(1, 2), dest),
            Some(Direction::East)
        );
    }

    #[test]
    fn budget_floor_suspends_and_resume_completes() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        // Budget for only a handful of pops per tick.
        let clock = FakeClock::with_budget(10, 50, 10);

        let request = AdvanceRequest::new(NavTarget::Tile(Tile::new(0, 0)));
        let status = engine.advance(&mut channel, &clock, &map, &landmarks(), &request);
        assert_eq!(status, AdvanceStatus::InProgress);

        // The suspended commit is stamped but not finished.
        let word = channel.cell(engine.layout().metadata_index(PageId(0)));
        let meta = PageMetadata::decode(word).unwrap();
        assert!(!meta.finished);
        assert_eq!(meta.tick_stamp, 10);

        // Resuming across ticks finishes without restarting.
        let mut status = AdvanceStatus::InProgress;
        for _ in 0..20 {
            clock.advance(1);
            status = engine.advance(&mut channel, &clock, &map, &landmarks(), &request);
            if status == AdvanceStatus::Done {
                break;
            }
        }
        assert_eq!(status, AdvanceStatus::Done);

        let word = channel.cell(engine.layout().metadata_index(PageId(0)));
        assert!(PageMetadata::decode(word).unwrap().is_complete());
    }

    #[test]
    fn done_target_is_not_recomputed_next_tick() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(5);

        let request = AdvanceRequest::new(NavTarget::Tile(Tile::new(4, 4)));
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );
        let writes = channel.write_count();

        clock.advance(1);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );
        assert_eq!(channel.write_count(), writes);
    }

    #[test]
    fn walls_are_never_published() {
        let map = AsciiMap::parse(
            "
            .....
            .###.
            .....
            .....
            .....
            ",
        );
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(1);

        let dest = Tile::new(0, 0);
        let request = AdvanceRequest::new(NavTarget::Tile(dest));
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );

        let reader = engine.reader();
        for x in 1..4 {
            assert_eq!(reader.lookup(&channel, Tile::new(x, 1), dest), None);
        }
        // Tiles behind the wall still route around it.
        assert!(reader.lookup(&channel, Tile::new(2, 2), dest).is_some());
    }

    #[test]
    fn unknown_terrain_marks_the_page_and_restart_covers_it() {
        let mut map = AsciiMap::parse(
            "
            .....
            .....
            ??...
            .....
            .....
            ",
        );
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(30);

        let dest = Tile::new(4, 4);
        let request = AdvanceRequest::new(NavTarget::Tile(dest));
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );

        let word = channel.cell(engine.layout().metadata_index(PageId(0)));
        let meta = PageMetadata::decode(word).unwrap();
        assert!(meta.finished);
        assert!(meta.contains_unknowns);
        assert!(!meta.is_complete());
        assert_eq!(
            engine.reader().lookup(&channel, Tile::new(0, 2), dest),
            None
        );

        // The fog lifts; the next advance restarts on the same page and
        // covers the revealed tiles.
        map.set(0, 2, TerrainClass::Normal);
        map.set(1, 2, TerrainClass::Normal);
        clock.advance(1);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );

        let word = channel.cell(engine.layout().metadata_index(PageId(0)));
        assert!(PageMetadata::decode(word).unwrap().is_complete());
        assert!(engine
            .reader()
            .lookup(&channel, Tile::new(0, 2), dest)
            .is_some());
    }

    #[test]
    fn acquisition_read_failure_declines_the_tick() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        // Channel too short for the layout: metadata reads go out of range.
        let mut channel = ArrayChannel::new(10);
        let clock = FakeClock::new(2);

        let request = AdvanceRequest::new(NavTarget::Tile(Tile::new(0, 0)));
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Declined
        );
    }

    #[test]
    fn stronghold_target_seeds_base_and_structures() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(9);

        let marks = FixedLandmarks {
            own_base: Tile::new(0, 0),
            enemy_base: Tile::new(4, 4),
            own_structures: Vec::new(),
            enemy_structures: vec![Tile::new(0, 4)],
        };
        let request = AdvanceRequest::new(NavTarget::EnemyStrongholds);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &marks, &request),
            AdvanceStatus::Done
        );

        // Records are keyed by the enemy base, and a tile next to the
        // tower routes to the tower rather than across the map.
        let reader = engine.reader();
        assert_eq!(
            reader.lookup(&channel, Tile::new(1, 4), Tile::new(4, 4)),
            Some(Direction::West)
        );
    }

    #[test]
    fn losing_a_finished_page_recomputes_instead_of_stamping_empty() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(40);

        let dest = Tile::new(4, 4);
        let request = AdvanceRequest::new(NavTarget::Tile(dest));
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );

        // Another agent reclaims page 0 for its own destination.
        let foreign = PageMetadata::for_commit(TickId(41), (2, 0), Priority::Low, false, false);
        channel
            .write_cell(engine.layout().metadata_index(PageId(0)), foreign.encode())
            .unwrap();

        clock.advance(3);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &landmarks(), &request),
            AdvanceStatus::Done
        );

        // The replacement page carries a full map for the destination,
        // not a bare finished stamp.
        let word = channel.cell(engine.layout().metadata_index(PageId(1)));
        let meta = PageMetadata::decode(word).unwrap();
        assert!(meta.is_complete());
        assert_eq!(meta.dest(), engine.layout().wire_coords(dest));
        let cell = engine.layout().cell_index(PageId(1), 2, 2);
        assert!(PathRecord::decode(channel.cell(cell)).is_some());
        assert!(engine
            .reader()
            .lookup(&channel, Tile::new(2, 2), dest)
            .is_some());
    }

    #[test]
    fn restart_recomputes_a_completed_target() {
        let map = AsciiMap::parse(OPEN_5X5);
        let mut engine = engine_for(&map);
        let mut channel = ArrayChannel::new(channel_capacity(&map));
        let clock = FakeClock::new(15);

        let marks = FixedLandmarks {
            own_base: Tile::new(0, 0),
            enemy_base: Tile::new(4, 4),
            own_structures: Vec::new(),
            enemy_structures: vec![Tile::new(0, 4)],
        };
        let request = AdvanceRequest::new(NavTarget::EnemyStrongholds);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &marks, &request),
            AdvanceStatus::Done
        );
        // Next to the tower: one tick away.
        let cell = engine.layout().cell_index(PageId(0), 1, 4);
        assert_eq!(PathRecord::decode(channel.cell(cell)).map(|r| r.cost), Some(1));

        // The tower is razed. Without a restart the finished page stands.
        let razed = FixedLandmarks::bases(Tile::new(0, 0), Tile::new(4, 4));
        clock.advance(1);
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &razed, &request),
            AdvanceStatus::Done
        );
        assert_eq!(PathRecord::decode(channel.cell(cell)).map(|r| r.cost), Some(1));

        // With one, the page is recomputed from the surviving seed and
        // the stale one-tick route to the razed tower is gone.
        clock.advance(1);
        let restart = AdvanceRequest::new(NavTarget::EnemyStrongholds).restart();
        assert_eq!(
            engine.advance(&mut channel, &clock, &map, &razed, &restart),
            AdvanceStatus::Done
        );
        assert_eq!(PathRecord::decode(channel.cell(cell)).map(|r| r.cost), Some(2));
    }

    #[test]
    fn mismatched_layout_and_window_is_rejected() {
        let layout = ChannelLayout::new(6, 6, 200).unwrap();
        let window = CoordinateWindow::new(5, 5, Tile::new(0, 0)).unwrap();
        let symmetry = SymmetryModel::detect(Tile::new(0, 0), Tile::new(3, 2), &[], &[]);
        let oracle = TerrainOracle::new(window, symmetry);
        assert_eq!(
            NavEngine::new(layout, oracle).err(),
            Some(NavError::WindowMismatch {
                window: (5, 5),
                layout: (6, 6),
            })
        );
    }
}
