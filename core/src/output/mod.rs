mod allocator;
mod timestamp;

pub use allocator::{ensure_dir, output_path, DirState, OutputAllocator};
pub use timestamp::CaptureTimestamp;
