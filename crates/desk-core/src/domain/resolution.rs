//! Coordinate mapping between the viewer's surface and the remote screen.
//!
//! The viewer renders the remote video into a local surface whose size rarely
//! matches the controlled machine's physical resolution.  Both sides agree on
//! positions by going through a *proportional* position: a point that is 25%
//! of the way across the local surface is 25% of the way across the remote
//! screen.
//!
//! ```text
//! local surface (960×540)            remote screen (1920×1080)
//! ┌──────────────┐                   ┌────────────────────────────┐
//! │   ·(240,135) │  ── 25%, 25% ──▶  │      ·(480,270)            │
//! └──────────────┘                   └────────────────────────────┘
//! ```
//!
//! Results are rounded half-away-from-zero to whole pixels in both
//! directions, so a local → remote → local round trip is stable to within one
//! pixel per axis when the remote screen is at least as large as the surface.

/// The four dimensions every transform depends on.
///
/// A dimension of `0` means "not known yet": the remote size arrives with the
/// first `screensize` report and the local size with the first surface
/// layout.  Transforms refuse to run until all four are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolutionMap {
    /// Width of the controlled machine's screen in pixels.
    pub remote_width: u32,
    /// Height of the controlled machine's screen in pixels.
    pub remote_height: u32,
    /// Width of the viewer's rendering surface in pixels.
    pub local_width: u32,
    /// Height of the viewer's rendering surface in pixels.
    pub local_height: u32,
}

impl ResolutionMap {
    /// Creates a map from all four dimensions.
    pub fn new(remote_width: u32, remote_height: u32, local_width: u32, local_height: u32) -> Self {
        Self {
            remote_width,
            remote_height,
            local_width,
            local_height,
        }
    }

    /// Returns `true` when no dimension is zero.
    pub fn is_resolved(&self) -> bool {
        self.remote_width != 0
            && self.remote_height != 0
            && self.local_width != 0
            && self.local_height != 0
    }
}

/// On-screen offset of the local rendering surface's top-left corner.
///
/// Pointer events arrive in window/client coordinates; subtracting the origin
/// yields the position relative to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceOrigin {
    pub x: f64,
    pub y: f64,
}

impl SurfaceOrigin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pure transform between local-surface space and remote-screen space.
///
/// Holds nothing but the last known [`ResolutionMap`].
#[derive(Debug, Clone, Default)]
pub struct CoordinateMapper {
    resolution: ResolutionMap,
}

impl CoordinateMapper {
    /// Creates a mapper with the given resolutions.
    pub fn new(resolution: ResolutionMap) -> Self {
        Self { resolution }
    }

    /// Returns the current resolution map.
    pub fn resolution(&self) -> &ResolutionMap {
        &self.resolution
    }

    /// Records the controlled machine's screen size (from a `screensize` report).
    pub fn set_remote_size(&mut self, width: u32, height: u32) {
        self.resolution.remote_width = width;
        self.resolution.remote_height = height;
    }

    /// Records the local surface size (after a layout or resize).
    pub fn set_local_size(&mut self, width: u32, height: u32) {
        self.resolution.local_width = width;
        self.resolution.local_height = height;
    }

    /// Maps a pointer position on the local surface to remote-screen pixels.
    ///
    /// `local_x`/`local_y` are in the same space as `origin` (typically the
    /// window's client coordinates).  Points outside the surface map outside
    /// the remote screen; nothing is clamped.
    ///
    /// Returns `None` while any dimension of the resolution map is zero.
    pub fn local_to_remote(
        &self,
        local_x: f64,
        local_y: f64,
        origin: SurfaceOrigin,
    ) -> Option<(i32, i32)> {
        if !self.resolution.is_resolved() {
            return None;
        }
        let x = scale(
            local_x - origin.x,
            self.resolution.local_width,
            self.resolution.remote_width,
        );
        let y = scale(
            local_y - origin.y,
            self.resolution.local_height,
            self.resolution.remote_height,
        );
        Some((x, y))
    }

    /// Maps a remote-screen position to a position on the local surface.
    ///
    /// The result is relative to the surface's top-left corner.
    ///
    /// Returns `None` while any dimension of the resolution map is zero.
    pub fn remote_to_local(&self, remote_x: i32, remote_y: i32) -> Option<(i32, i32)> {
        if !self.resolution.is_resolved() {
            return None;
        }
        let x = scale(
            f64::from(remote_x),
            self.resolution.remote_width,
            self.resolution.local_width,
        );
        let y = scale(
            f64::from(remote_y),
            self.resolution.remote_height,
            self.resolution.local_height,
        );
        Some((x, y))
    }
}

/// Scales `pos` proportionally from a span of `from_len` to a span of `to_len`.
///
/// `f64::round` rounds half away from zero.  `from_len` must be non-zero;
/// callers check [`ResolutionMap::is_resolved`] first.
fn scale(pos: f64, from_len: u32, to_len: u32) -> i32 {
    let percent = pos / f64::from(from_len);
    (f64::from(to_len) * percent).round() as i32
}

// ── Tests ─────────────────────────────────────────────────────────────────────
