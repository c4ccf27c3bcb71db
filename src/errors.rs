//! The `Error`, `ErrorKind`, `ResultExt` and `Result` types used by every
//! fallible operation in the crate.

use error_chain::error_chain;

error_chain! {
    errors {
        /// Grid construction or resize with an even or sub-3 dimension.
        InvalidDimension(width: usize, height: usize) {
            description("grid dimensions must be odd and at least 3")
            display("invalid grid dimensions {}x{}: both must be odd and at least 3", width, height)
        }
        /// Cell query outside of the grid rectangle.
        OutOfRange(x: i64, y: i64) {
            description("cell coordinate out of range")
            display("cell coordinate ({}, {}) is outside the grid", x, y)
        }
        /// A generation strategy cannot be applied with the given parameters
        /// and grid dimensions.
        GenerationFailure(detail: String) {
            description("maze generation failed")
            display("maze generation failed: {}", detail)
        }
        /// Encode attempted on a grid that has never been generated.
        NoMaze {
            description("the grid holds no generated maze")
            display("the grid holds no generated maze")
        }
        /// Encode attempted without an output destination.
        NoDestination {
            description("no output destination given")
            display("no output destination given")
        }
        /// The output destination could not be (fully) written. The
        /// destination may be left in a partial state and should be discarded.
        OpenFailure(path: String) {
            description("failed to write output destination")
            display("failed to write output destination {}", path)
        }
        /// Unsupported combination of encoder formatting options.
        UnknownCommand(detail: String) {
            description("unsupported encoder option combination")
            display("unsupported encoder option combination: {}", detail)
        }
    }
}
