//! Host boundary - the only two things the core needs from a platform
//!
//! A host (browser page, native window, test harness) hands in one
//! `FrameInput` per frame and receives one finished pixel buffer back. No
//! window, event or surface type crosses this line.

use super::input::FrameInput;
use super::WorldCore;

/// Borrowed view of a finished frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub width: u32,
    pub height: u32,
    /// Ticks simulated so far
    pub frame: u64,
    /// 0x00RRGGBB, row-major, top row first
    pub pixels: &'a [u32],
}

pub trait InputSource {
    fn poll(&mut self) -> FrameInput;
}

pub trait FrameSink {
    fn present(&mut self, frame: FrameView<'_>);
}

impl<F> FrameSink for F
where
    F: FnMut(FrameView<'_>),
{
    fn present(&mut self, frame: FrameView<'_>) {
        self(frame)
    }
}

impl WorldCore {
    /// Poll -> tick -> present
    pub fn run_frame<I, S>(&mut self, input: &mut I, sink: &mut S)
    where
        I: InputSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        let frame_input = input.poll();
        self.tick(&frame_input);
        sink.present(self.frame_view());
    }
}
