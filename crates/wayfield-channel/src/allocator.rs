//! Implicit-lease page acquisition.

use crate::layout::ChannelLayout;
use crate::metadata::PageMetadata;
use wayfield_core::{ChannelError, PageId, Priority, SharedChannel, TickId};

/// Outcome of a page acquisition attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageGrant {
    /// Continue the suspended expansion on our own page.
    Resume(PageId),
    /// Our page finished earlier but touched unknown terrain; reset the
    /// frontier and re-expand on the same page.
    Restart(PageId),
    /// A reclaimed (or force-seized) page; its prior contents are stale
    /// and will be overwritten.
    Fresh(PageId),
    /// Our own page already holds a complete, undamaged map for this
    /// destination. There is no work left to do unless the caller
    /// deliberately recomputes it.
    AlreadyComplete(PageId),
    /// No page is available, or another agent is already working this
    /// destination. Retry on a later tick.
    Declined,
}

/// Decides which page, if any, an agent may use this tick.
///
/// There is no lock anywhere in the protocol. A page is "owned" by
/// whoever most recently stamped its metadata tick, and that ownership
/// silently expires when the stamp is not renewed. Two agents whose
/// reads interleave can both conclude a page is free in the same tick;
/// that race is deliberate — the later metadata writer becomes
/// authoritative, readers destination-match every record, and the only
/// cost is one tick of duplicated work.
///
/// One allocator instance belongs to one worker agent; the previous-work
/// memory it keeps is what lets the agent find its own page again.
#[derive(Clone, Debug, Default)]
pub struct PageAllocator {
    previous_dest: Option<(u8, u8)>,
    previous_page: Option<PageId>,
    previous_stamp: u32,
}

impl PageAllocator {
    /// A fresh allocator with no work history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that we worked `page` for `dest` at `now`, immediately
    /// after committing the page metadata. This is what step 1 of the
    /// next acquisition matches against.
    pub fn note_worked(&mut self, page: PageId, dest: (u8, u8), now: TickId) {
        self.previous_dest = Some(dest);
        self.previous_page = Some(page);
        self.previous_stamp = now.stamp();
    }

    /// Choose a page for `dest` at priority `priority`.
    ///
    /// Channel read failures propagate so the caller can log and decline
    /// for this tick; nothing here mutates the channel.
    pub fn acquire(
        &self,
        channel: &dyn SharedChannel,
        layout: &ChannelLayout,
        now: TickId,
        dest: (u8, u8),
        priority: Priority,
    ) -> Result<PageGrant, ChannelError> {
        // Step 1: reuse our own page if our last stamp is still on it.
        if let Some(grant) = self.reuse_own_page(channel, layout, dest)? {
            return Ok(grant);
        }

        // Steps 2-3: scan for a competing owner and the stalest page.
        // Untouched pages count as older than anything stamped.
        let mut stalest: Option<(PageId, u32)> = None;
        for page in layout.pages() {
            let word = channel.read_cell(layout.metadata_index(page))?;
            let age = match PageMetadata::decode(word) {
                None => u32::MAX,
                Some(meta) => {
                    let age = now.age_of(meta.tick_stamp);
                    if (age <= 1 || meta.finished) && meta.dest() == dest {
                        // Someone else is on the case.
                        return Ok(PageGrant::Declined);
                    }
                    age
                }
            };
            if stalest.map_or(true, |(_, best)| age > best) {
                stalest = Some((page, age));
            }
        }

        if let Some((page, age)) = stalest {
            if age >= 2 {
                return Ok(PageGrant::Fresh(page));
            }
        }

        // Step 4: the pool is hot; high priority trashes page 0.
        if priority == Priority::High {
            return Ok(PageGrant::Fresh(PageId(0)));
        }

        Ok(PageGrant::Declined)
    }

    fn reuse_own_page(
        &self,
        channel: &dyn SharedChannel,
        layout: &ChannelLayout,
        dest: (u8, u8),
    ) -> Result<Option<PageGrant>, ChannelError> {
        let (Some(prev_dest), Some(page)) = (self.previous_dest, self.previous_page) else {
            return Ok(None);
        };
        if prev_dest != dest {
            return Ok(None);
        }
        let word = channel.read_cell(layout.metadata_index(page))?;
        let Some(meta) = PageMetadata::decode(word) else {
            return Ok(None);
        };
        // Our stamp must still be on the page; otherwise someone
        // reclaimed it since we last worked.
        if meta.tick_stamp != self.previous_stamp || meta.dest() != dest {
            return Ok(None);
        }
        if meta.finished {
            if !meta.contains_unknowns {
                return Ok(Some(PageGrant::AlreadyComplete(page)));
            }
            return Ok(Some(PageGrant::Restart(page)));
        }
        Ok(Some(PageGrant::Resume(page)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfield_test_utils::ArrayChannel;

    const DEST: (u8, u8) = (3, 4);
    const OTHER: (u8, u8) = (9, 9);

    fn layout() -> ChannelLayout {
        // 10x10 map, room for exactly 5 pages.
        ChannelLayout::new(10, 10, 600).unwrap()
    }

    fn stamp(
        channel: &mut ArrayChannel,
        layout: &ChannelLayout,
        page: u8,
        tick: u32,
        dest: (u8, u8),
        finished: bool,
        unknowns: bool,
    ) {
        let meta =
            PageMetadata::for_commit(TickId(tick), dest, Priority::Low, finished, unknowns);
        channel
            .write_cell(layout.metadata_index(PageId(page)), meta.encode())
            .unwrap();
    }

    #[test]
    fn untouched_pool_grants_a_fresh_page() {
        let layout = layout();
        let channel = ArrayChannel::new(600);
        let alloc = PageAllocator::new();
        let grant = alloc
            .acquire(&channel, &layout, TickId(10), DEST, Priority::Low)
            .unwrap();
        assert!(matches!(grant, PageGrant::Fresh(_)));
    }

    #[test]
    fn stalest_page_is_reclaimed() {
        // Page 2 last updated at tick 10, all others at tick 50+; at
        // tick 60 a new destination gets page 2.
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        for (page, tick) in [(0u8, 50u32), (1, 52), (2, 10), (3, 55), (4, 58)] {
            stamp(&mut channel, &layout, page, tick, OTHER, false, false);
        }
        let alloc = PageAllocator::new();
        let grant = alloc
            .acquire(&channel, &layout, TickId(60), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::Fresh(PageId(2)));
    }

    #[test]
    fn competing_owner_declines_the_request() {
        // Another agent stamped our destination this very tick.
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 3, 60, DEST, false, false);
        let alloc = PageAllocator::new();
        let grant = alloc
            .acquire(&channel, &layout, TickId(60), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::Declined);
    }

    #[test]
    fn finished_page_for_same_destination_declines_even_when_old() {
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 1, 5, DEST, true, false);
        let alloc = PageAllocator::new();
        let grant = alloc
            .acquire(&channel, &layout, TickId(60), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::Declined);
    }

    #[test]
    fn hot_pool_declines_low_priority_and_seizes_for_high() {
        // Every page stamped within the last tick, none for our dest.
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        for page in 0u8..5 {
            stamp(&mut channel, &layout, page, 60, OTHER, false, false);
        }
        let alloc = PageAllocator::new();
        assert_eq!(
            alloc
                .acquire(&channel, &layout, TickId(60), DEST, Priority::Low)
                .unwrap(),
            PageGrant::Declined
        );
        assert_eq!(
            alloc
                .acquire(&channel, &layout, TickId(60), DEST, Priority::High)
                .unwrap(),
            PageGrant::Fresh(PageId(0))
        );
    }

    #[test]
    fn own_unfinished_page_resumes() {
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 2, 41, DEST, false, false);
        let mut alloc = PageAllocator::new();
        alloc.note_worked(PageId(2), DEST, TickId(41));
        let grant = alloc
            .acquire(&channel, &layout, TickId(42), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::Resume(PageId(2)));
    }

    #[test]
    fn own_complete_page_means_no_work() {
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 2, 41, DEST, true, false);
        let mut alloc = PageAllocator::new();
        alloc.note_worked(PageId(2), DEST, TickId(41));
        let grant = alloc
            .acquire(&channel, &layout, TickId(42), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::AlreadyComplete(PageId(2)));
    }

    #[test]
    fn own_page_with_unknowns_restarts() {
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 2, 41, DEST, true, true);
        let mut alloc = PageAllocator::new();
        alloc.note_worked(PageId(2), DEST, TickId(41));
        let grant = alloc
            .acquire(&channel, &layout, TickId(42), DEST, Priority::Low)
            .unwrap();
        assert_eq!(grant, PageGrant::Restart(PageId(2)));
    }

    #[test]
    fn expired_stamp_forfeits_own_page() {
        // Another agent re-stamped our page after we last worked it, so
        // reuse must fail and the scan takes over.
        let layout = layout();
        let mut channel = ArrayChannel::new(600);
        stamp(&mut channel, &layout, 2, 45, OTHER, false, false);
        let mut alloc = PageAllocator::new();
        alloc.note_worked(PageId(2), DEST, TickId(41));
        let grant = alloc
            .acquire(&channel, &layout, TickId(60), DEST, Priority::Low)
            .unwrap();
        // The scan still reclaims some stale page; just not via reuse.
        assert!(matches!(grant, PageGrant::Fresh(_)));
    }
}
