//! JSON-RPC 2.0 bridge between the editor and a host page.
//!
//! On wasm32 the editor runs inside an iframe and exchanges messages with its
//! parent via `postMessage`. Native builds compile the same dispatch code but
//! never receive messages.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent)  <──postMessage──>  Bevy (iframe)
//!        │                                     │
//!        ├─ Request (with ID) ───────────────> │
//!        │                                     ├─ Apply to BoardEditor
//!        │ <──────────────── Response (with ID)┤
//!        │                                     │
//!        │ <──── board_state_changed / fps_update
//! ```
//!
//! Requests without an id are treated as notifications: they are applied
//! but never answered.
//!
//! ## Methods
//!
//! ### Gestures
//! - `cell_click {x, z}`
//! - `drag_start {x, z}`, `drag_update {x, z}`, `drag_end`
//! - `select_agent {id}`
//!
//! ### Commands
//! - `confirm`, `cancel`
//! - `arm_agent_placement {type: "blue" | null}`
//! - `remove_agent {id}`, `clear_agents`
//! - `resize_board {size}`
//! - `set_colors {color1, color2}`, `set_show_labels {show}`
//!
//! ### Queries
//! - `get_board_state`: full [`BoardSnapshot`](snapshot::BoardSnapshot)
//! - `get_fps`
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Serializable view of the whole editor state.
pub mod snapshot;

/// JSON-RPC 2.0 bidirectional communication system.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
