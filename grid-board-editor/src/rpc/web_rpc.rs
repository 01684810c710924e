use crate::board::agents::AgentType;
use crate::board::config::parse_color;
use crate::board::geometry::Cell;
use crate::rpc::snapshot::BoardSnapshot;
use crate::tools::interaction::{BoardEditor, ClickOutcome};
use crate::tools::selection::DragOutcome;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the frontend without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the frontend.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Ordering handle for the RPC systems. Gesture systems run before it so a
/// frame's snapshot includes pointer changes.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct RpcSystems;

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    board_state_notification_system,
                    send_outgoing_messages,
                )
                    .chain()
                    .in_set(RpcSystems),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Thread-safe message queue for cross-thread communication.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let Some(window) = window() else {
        error!("Window object not available, RPC listener not installed");
        return;
    };
    if let Err(e) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to register message listener: {:?}", e);
        return;
    }

    // Prevent closure from being dropped by transferring ownership to JS.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the frontend.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut editor: ResMut<BoardEditor>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                debug!("Processing RPC method: {}", request.method);
                if let Some(response) = handle_rpc_request(&request, &diagnostics, &mut editor) {
                    rpc_interface.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
            }
        }
    }
}

/// Pushes a full board snapshot whenever the editor changed this frame.
fn board_state_notification_system(
    editor: Res<BoardEditor>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !editor.is_changed() {
        return;
    }
    match serde_json::to_value(BoardSnapshot::capture(&editor)) {
        Ok(snapshot) => rpc_interface.send_notification("board_state_changed", snapshot),
        Err(e) => error!("Failed to serialise board snapshot: {}", e),
    }
}

/// Dispatch a request against the editor. Requests without an id are
/// notifications: they are applied but produce no response.
pub fn handle_rpc_request(
    request: &RpcRequest,
    diagnostics: &DiagnosticsStore,
    editor: &mut BoardEditor,
) -> Option<RpcResponse> {
    if request.jsonrpc != "2.0" {
        warn!("Rejected RPC with jsonrpc version '{}'", request.jsonrpc);
        let id = request.id.clone()?;
        return Some(create_error_response(
            id,
            -32600,
            "Invalid request",
            Some(serde_json::json!({"jsonrpc": request.jsonrpc})),
        ));
    }

    let params = &request.params;
    let result = match request.method.as_str() {
        "cell_click" => handle_cell_click(params, editor),
        "drag_start" => handle_drag_start(params, editor),
        "drag_update" => handle_drag_update(params, editor),
        "drag_end" => Ok(handle_drag_end(editor)),
        "select_agent" => handle_select_agent(params, editor),
        "confirm" => Ok(serde_json::json!({ "applied": editor.confirm() })),
        "cancel" => {
            editor.cancel();
            Ok(serde_json::json!({ "success": true }))
        }
        "arm_agent_placement" => handle_arm_agent_placement(params, editor),
        "remove_agent" => handle_remove_agent(params, editor),
        "clear_agents" => Ok(serde_json::json!({ "removed": editor.clear_agents() })),
        "resize_board" => handle_resize_board(params, editor),
        "set_colors" => handle_set_colors(params, editor),
        "set_show_labels" => handle_set_show_labels(params, editor),
        "get_board_state" => serde_json::to_value(BoardSnapshot::capture(editor))
            .map_err(|e| RpcError::internal_error(&e.to_string())),
        "get_fps" => handle_get_fps(diagnostics),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                request.id.clone()?,
                -32601,
                "Method not found",
                Some(serde_json::json!({"method": request.method})),
            ));
        }
    };

    let id = request.id.clone()?;
    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        }),
    }
}

#[derive(Deserialize)]
struct CellParams {
    x: u32,
    z: u32,
}

fn cell_param(params: &serde_json::Value) -> Result<Cell, RpcError> {
    let p = serde_json::from_value::<CellParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'x' and 'z' cell coordinates"))?;
    Ok(Cell::new(p.x, p.z))
}

fn handle_cell_click(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    let cell = cell_param(params)?;
    Ok(match editor.cell_click(cell) {
        ClickOutcome::Placed(agent) => serde_json::json!({ "outcome": "placed", "agent": agent }),
        ClickOutcome::Rejected => serde_json::json!({ "outcome": "rejected" }),
        ClickOutcome::Pending => serde_json::json!({ "outcome": "pending", "pending": editor.pending() }),
        ClickOutcome::Ignored => serde_json::json!({ "outcome": "ignored" }),
    })
}

fn handle_drag_start(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    let cell = cell_param(params)?;
    Ok(serde_json::json!({ "started": editor.drag_start(cell) }))
}

fn handle_drag_update(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    let cell = cell_param(params)?;
    Ok(serde_json::json!({ "changed": editor.drag_update(cell) }))
}

fn handle_drag_end(editor: &mut BoardEditor) -> serde_json::Value {
    let outcome = match editor.drag_end() {
        Some(DragOutcome::Click(_)) => Some("click"),
        Some(DragOutcome::AddRange(_)) => Some("add_range"),
        Some(DragOutcome::RemoveRange(_)) => Some("remove_range"),
        None => None,
    };
    serde_json::json!({ "outcome": outcome, "pending": editor.pending() })
}

#[derive(Deserialize)]
struct AgentIdParams {
    id: String,
}

fn handle_select_agent(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    let p = serde_json::from_value::<AgentIdParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
    Ok(serde_json::json!({ "selected": editor.select_agent(&p.id) }))
}

fn handle_remove_agent(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    let p = serde_json::from_value::<AgentIdParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
    Ok(serde_json::json!({ "removed": editor.remove_agent(&p.id) }))
}

fn handle_arm_agent_placement(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ArmParams {
        #[serde(rename = "type")]
        kind: Option<String>,
    }

    let p = serde_json::from_value::<ArmParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'type' parameter (string or null)"))?;

    let kind = match p.kind {
        Some(name) => Some(
            AgentType::from_string(&name)
                .ok_or_else(|| RpcError::invalid_params(&format!("Unknown agent type: {}", name)))?,
        ),
        None => None,
    };
    editor.arm_agent_placement(kind);

    Ok(serde_json::json!({ "placement": editor.placement() }))
}

fn handle_resize_board(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ResizeParams {
        size: u32,
    }

    let p = serde_json::from_value::<ResizeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected non-negative 'size' parameter"))?;
    Ok(serde_json::json!({ "size": editor.resize_board(p.size) }))
}

fn handle_set_colors(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct ColorParams {
        color1: String,
        color2: String,
    }

    let p = serde_json::from_value::<ColorParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'color1' and 'color2' parameters"))?;
    let color1 = parse_color("color1", &p.color1).map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    let color2 = parse_color("color2", &p.color2).map_err(|e| RpcError::invalid_params(&e.to_string()))?;
    editor.set_colors(color1, color2);

    Ok(serde_json::json!({ "success": true }))
}

fn handle_set_show_labels(
    params: &serde_json::Value,
    editor: &mut BoardEditor,
) -> Result<serde_json::Value, RpcError> {
    #[derive(Deserialize)]
    struct LabelParams {
        show: bool,
    }

    let p = serde_json::from_value::<LabelParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected boolean 'show' parameter"))?;
    editor.set_show_labels(p.show);
    Ok(serde_json::json!({ "show_labels": p.show }))
}

/// Handle FPS retrieval with diagnostic system integration.
fn handle_get_fps(diagnostics: &DiagnosticsStore) -> Result<serde_json::Value, RpcError> {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps_diagnostic| fps_diagnostic.smoothed())
        .unwrap_or(0.0) as f32;

    Ok(serde_json::json!({
        "fps": fps
    }))
}

/// Create standardized error response with optional data payload.
fn create_error_response(
    id: serde_json::Value,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id: Some(id),
    }
}

/// Send queued notifications and responses to the frontend.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses second to maintain order.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        // No-op for non-WASM targets.
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn request(method: &str, params: Value) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".into(),
            method: method.into(),
            params,
            id: Some(json!(1)),
        }
    }

    fn call(editor: &mut BoardEditor, method: &str, params: Value) -> RpcResponse {
        handle_rpc_request(&request(method, params), &DiagnosticsStore::default(), editor)
            .expect("requests with an id get a response")
    }

    #[test]
    fn click_then_confirm_adds_obstacle() {
        let mut editor = BoardEditor::default();
        let click = call(&mut editor, "cell_click", json!({ "x": 2, "z": 3 }));
        assert_eq!(click.result.unwrap()["outcome"], json!("pending"));

        let confirm = call(&mut editor, "confirm", Value::Null);
        assert_eq!(confirm.result.unwrap(), json!({ "applied": true }));
        assert!(editor.obstacles().has(Cell::new(2, 3)));
    }

    #[test]
    fn drag_sequence_over_rpc_proposes_mass_add() {
        let mut editor = BoardEditor::default();
        call(&mut editor, "drag_start", json!({ "x": 0, "z": 0 }));
        call(&mut editor, "drag_update", json!({ "x": 1, "z": 2 }));
        let end = call(&mut editor, "drag_end", Value::Null).result.unwrap();

        assert_eq!(end["outcome"], json!("add_range"));
        assert_eq!(end["pending"]["kind"], json!("mass_add"));
        assert_eq!(end["pending"]["cells"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn arm_and_place_agent() {
        let mut editor = BoardEditor::default();
        call(&mut editor, "arm_agent_placement", json!({ "type": "blue" }));
        let placed = call(&mut editor, "cell_click", json!({ "x": 4, "z": 4 })).result.unwrap();
        assert_eq!(placed["outcome"], json!("placed"));
        assert_eq!(placed["agent"]["type"], json!("blue"));

        let disarm = call(&mut editor, "arm_agent_placement", json!({ "type": null }));
        assert_eq!(disarm.result.unwrap(), json!({ "placement": null }));
    }

    #[test]
    fn unknown_agent_type_is_invalid_params() {
        let mut editor = BoardEditor::default();
        let response = call(&mut editor, "arm_agent_placement", json!({ "type": "red" }));
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
        assert_eq!(editor.placement(), None);
    }

    #[test]
    fn bad_colour_leaves_config_untouched() {
        let mut editor = BoardEditor::default();
        let before = editor.config().clone();
        let response = call(
            &mut editor,
            "set_colors",
            json!({ "color1": "#ffffff", "color2": "green-ish" }),
        );
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
        assert_eq!(editor.config(), &before);
    }

    #[test]
    fn resize_reports_clamped_size() {
        let mut editor = BoardEditor::default();
        let response = call(&mut editor, "resize_board", json!({ "size": 100 }));
        assert_eq!(response.result.unwrap(), json!({ "size": 20 }));
    }

    #[test]
    fn missing_params_are_invalid() {
        let mut editor = BoardEditor::default();
        let response = call(&mut editor, "cell_click", json!({ "x": 1 }));
        assert_eq!(response.error.map(|e| e.code), Some(-32602));
    }

    #[test]
    fn unknown_method_is_not_found() {
        let mut editor = BoardEditor::default();
        let response = call(&mut editor, "teleport", Value::Null);
        assert_eq!(response.error.map(|e| e.code), Some(-32601));
    }

    #[test]
    fn wrong_protocol_version_is_invalid_request() {
        let mut editor = BoardEditor::default();
        let mut req = request("confirm", Value::Null);
        req.jsonrpc = "1.0".into();
        let response = handle_rpc_request(&req, &DiagnosticsStore::default(), &mut editor).unwrap();
        assert_eq!(response.error.map(|e| e.code), Some(-32600));
    }

    #[test]
    fn notifications_apply_without_response() {
        let mut editor = BoardEditor::default();
        let mut req = request("set_show_labels", json!({ "show": true }));
        req.id = None;
        let response = handle_rpc_request(&req, &DiagnosticsStore::default(), &mut editor);
        assert!(response.is_none());
        assert!(editor.config().show_labels);
    }

    #[test]
    fn board_state_returns_snapshot() {
        let mut editor = BoardEditor::default();
        let state = call(&mut editor, "get_board_state", Value::Null).result.unwrap();
        assert_eq!(state["size"], json!(8));
        assert_eq!(state["obstacles"], json!([]));
        assert_eq!(state["pending"], json!(null));
    }

    #[test]
    fn missing_params_field_deserialises_as_null() {
        let req: RpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"cancel","id":7}"#).unwrap();
        assert_eq!(req.params, Value::Null);
    }
}
