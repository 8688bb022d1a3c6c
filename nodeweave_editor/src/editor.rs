// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor: frame protocol and id-addressed public surface.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Size, Vec2};
use nodeweave_canvas::{Canvas, View};
use nodeweave_graph::{
    Color, Graph, LinkId, NodeId, ObjectId, ObjectKey, ObjectKind, PinId, PinKind, Selection,
};
use tracing::{debug, warn};

use crate::actions::{
    Action, ActionContext, ActionKind, CreateItemAction, CreateStage, Query, QueryResult,
    Scheduler, UserAction,
};
use crate::builder::{NodeBuilder, NodeStage};
use crate::config::Config;
use crate::control::{Control, ControlResolver};
use crate::error::UsageError;
use crate::input::{Input, MouseState, PointerButtons};
use crate::render::{self, DrawList, Scene};
use crate::settings::{Settings, SettingsStore};
use crate::style::{ColorLookup, StyleColor};

/// Callback receiving links dropped because one of their pins disappeared.
pub type LinkDroppedFn = Box<dyn FnMut(LinkId)>;

/// An immediate-mode node graph editor.
///
/// ## Frame protocol
///
/// Every frame the host:
///
/// 1. calls [`Editor::begin`] with the window rectangle and the frame's [`Input`];
/// 2. declares every node (region by region), pin and link that exists;
/// 3. calls [`Editor::end`], which resolves hot/active/clicked objects and runs
///    the interaction [actions](ActionKind);
/// 4. answers the creation and deletion wizards, if they are open;
/// 5. paints with [`Editor::paint`].
///
/// Objects are addressed by caller-chosen 32-bit ids. One id names one object:
/// reusing a node id for a pin is refused and reported.
///
/// ## Usage errors
///
/// Calls made out of order (e.g. `end_node` without `begin_node`) do not panic and
/// do not silently fix the sequence. They are logged with `tracing`, recorded for
/// [`Editor::last_usage_error`] and answered with a neutral value.
pub struct Editor {
    graph: Graph,
    selection: Selection,
    view: View,
    canvas: Canvas,
    config: Config,
    settings: Settings,
    store: Option<Box<dyn SettingsStore>>,
    mouse: MouseState,
    prev_mouse: MouseState,
    builder: NodeBuilder,
    control: Control,
    resolver: ControlResolver,
    scheduler: Scheduler,
    in_frame: bool,
    suspended: bool,
    frozen: bool,
    link_dropped: Option<LinkDroppedFn>,
    last_error: Option<UsageError>,
    create_style: (Color, f64),
    create_open: bool,
    delete_open: bool,
}

impl core::fmt::Debug for Editor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Editor")
            .field("graph", &self.graph)
            .field("selection", &self.selection.len())
            .field("view", &self.view)
            .field("action", &self.scheduler.kind())
            .field("in_frame", &self.in_frame)
            .field("suspended", &self.suspended)
            .field("has_store", &self.store.is_some())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    /// An editor without persistence.
    pub fn new(config: Config) -> Self {
        Self {
            graph: Graph::new(),
            selection: Selection::new(),
            view: View::default(),
            canvas: Canvas::default(),
            config,
            settings: Settings::default(),
            store: None,
            mouse: MouseState::default(),
            prev_mouse: MouseState::default(),
            builder: NodeBuilder::default(),
            control: Control::default(),
            resolver: ControlResolver::default(),
            scheduler: Scheduler::default(),
            in_frame: false,
            suspended: false,
            frozen: false,
            link_dropped: None,
            last_error: None,
            create_style: (Color::WHITE, 1.0),
            create_open: false,
            delete_open: false,
        }
    }

    /// An editor that loads its settings from `store` and saves them back whenever
    /// they change.
    pub fn with_store(config: Config, mut store: impl SettingsStore + 'static) -> Self {
        let mut editor = Self::new(config);
        if let Some(mut settings) = store.load() {
            settings.reset_usage();
            settings.dirty = false;
            editor.view.scroll = settings.view_scroll;
            if !editor.view.set_zoom(settings.view_zoom) {
                settings.view_zoom = editor.view.zoom;
            }
            debug!(nodes = settings.nodes.len(), "settings loaded");
            editor.settings = settings;
        }
        editor.store = Some(Box::new(store));
        editor
    }

    fn report(&mut self, err: UsageError) {
        warn!(error = %err, "editor usage error");
        self.last_error = Some(err);
    }

    fn check<T>(&mut self, result: Result<T, UsageError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    fn require_frame(&mut self, op: &'static str) -> bool {
        if !self.in_frame {
            self.report(UsageError::FrameClosed { op });
        }
        self.in_frame
    }

    // --- frame protocol ---

    /// Start a frame. `window` is the editor's rectangle in screen space.
    pub fn begin(&mut self, window: Rect, input: &Input) {
        if self.in_frame {
            self.report(UsageError::FrameOpen);
        }
        self.in_frame = true;
        self.canvas = self.view.canvas(window);
        self.prev_mouse = self.mouse;
        self.mouse.update(input, self.config.drag_threshold);
        self.graph.mark_all_dead();
        self.builder.reset();
        self.selection.reset_changed();
        self.frozen = false;
        self.create_open = false;
        self.delete_open = false;
    }

    /// Finish the frame: resolve the pointer against the declared objects, run the
    /// interaction actions and persist settings if they changed.
    pub fn end(&mut self) {
        if !self.require_frame("end") {
            return;
        }
        self.in_frame = false;
        let stage = self.builder.stage();
        if !matches!(stage, NodeStage::Invalid | NodeStage::End) {
            self.report(UsageError::Stage { op: "end", stage });
            self.builder.reset();
        }
        if self.suspended {
            self.report(UsageError::Unbalanced { op: "end" });
            self.suspended = false;
            self.frozen = true;
        }

        self.graph.finish_layers();
        let protected = self.scheduler.protected_links();
        for id in self.graph.prune_dangling_links(&protected) {
            debug!(link = id.0, "dangling link dropped");
            if let Some(callback) = &mut self.link_dropped {
                callback(id);
            }
        }
        let graph = &self.graph;
        self.selection.retain(|key| graph.is_live(key));

        if !self.frozen {
            let pan = self.config.pan_button;
            self.control = self.resolver.resolve(
                &self.graph,
                &self.canvas,
                &self.mouse,
                &[PointerButtons::PRIMARY, pan],
            );
            let mut cx = ActionContext {
                graph: &mut self.graph,
                selection: &mut self.selection,
                view: &mut self.view,
                canvas: &self.canvas,
                mouse: &self.mouse,
                config: &self.config,
                settings: &mut self.settings,
            };
            self.scheduler.run(&mut cx, &self.control);
        }

        if self.settings.view_scroll != self.view.scroll
            || self.settings.view_zoom != self.view.zoom
        {
            self.settings.view_scroll = self.view.scroll;
            self.settings.view_zoom = self.view.zoom;
            self.settings.mark_dirty();
        }
        if self.settings.dirty {
            if let Some(store) = &mut self.store {
                self.settings.prune_unused();
                store.save(&self.settings);
                self.settings.dirty = false;
                debug!("settings saved");
            }
        }
    }

    /// Freeze the editor while a nested UI element owns the pointer.
    ///
    /// Hit testing and actions stop and the pointer state of the previous frame is
    /// restored. Must be paired with [`Editor::resume`].
    pub fn suspend(&mut self) {
        if self.suspended {
            self.report(UsageError::Unbalanced { op: "suspend" });
            return;
        }
        self.suspended = true;
        self.frozen = true;
        self.mouse = self.prev_mouse;
    }

    /// End a [suspension](Editor::suspend).
    pub fn resume(&mut self) {
        if !self.suspended {
            self.report(UsageError::Unbalanced { op: "resume" });
            return;
        }
        self.suspended = false;
    }

    /// Whether [`Editor::suspend`] is in effect.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    // --- node staging ---

    /// Open node `id`.
    pub fn begin_node(&mut self, id: NodeId) -> bool {
        if !self.require_frame("begin_node") {
            return false;
        }
        let result = self.builder.begin_node(&mut self.graph, &mut self.settings, id);
        self.check(result).is_some()
    }

    /// Open the header region, filled with `color`.
    pub fn begin_header(&mut self, color: Color) -> bool {
        let result = self.builder.begin_header(color);
        self.check(result).is_some()
    }

    /// Close the header region, whose content measured `size`.
    pub fn end_header(&mut self, size: Size) -> bool {
        let result = self
            .builder
            .end_header(&mut self.graph, &self.config.style, size);
        self.check(result).is_some()
    }

    /// Enter the body of a node that has no header.
    pub fn begin_content(&mut self) -> bool {
        let result = self.builder.begin_content(&self.config.style);
        self.check(result).is_some()
    }

    /// Place body content of `size`. Returns its rectangle in canvas space.
    pub fn add_content(&mut self, size: Size) -> Option<Rect> {
        let result = self
            .builder
            .add_content(&mut self.graph, &self.config.style, size);
        self.check(result)
    }

    /// Open input pin `id`.
    pub fn begin_input(&mut self, id: PinId) -> bool {
        let result = self.builder.begin_pin(&mut self.graph, id, PinKind::Input);
        self.check(result).is_some()
    }

    /// Close the open input pin. Returns its rectangle in canvas space.
    pub fn end_input(&mut self, size: Size) -> Option<Rect> {
        let result = self
            .builder
            .end_pin(&mut self.graph, &self.config.style, PinKind::Input, size);
        self.check(result)
    }

    /// Open output pin `id`.
    pub fn begin_output(&mut self, id: PinId) -> bool {
        let result = self.builder.begin_pin(&mut self.graph, id, PinKind::Output);
        self.check(result).is_some()
    }

    /// Close the open output pin. Returns its rectangle in canvas space.
    pub fn end_output(&mut self, size: Size) -> Option<Rect> {
        let result = self
            .builder
            .end_pin(&mut self.graph, &self.config.style, PinKind::Output, size);
        self.check(result)
    }

    /// Where links attach to the open pin, relative to its rectangle
    /// (`(0, 0)` top-left, `(1, 1)` bottom-right).
    pub fn set_pin_pivot(&mut self, pivot: Vec2) -> bool {
        let result = self.builder.set_pin_pivot(pivot);
        self.check(result).is_some()
    }

    /// Close the open node.
    pub fn end_node(&mut self) -> bool {
        let result = self.builder.end_node(&mut self.graph, &self.config.style);
        self.check(result).is_some()
    }

    /// The staging state of the node being declared.
    pub fn node_stage(&self) -> NodeStage {
        self.builder.stage()
    }

    /// Declare link `id` from pin `start` to pin `end`.
    pub fn link(
        &mut self,
        id: LinkId,
        start: PinId,
        end: PinId,
        color: Color,
        thickness: f64,
    ) -> bool {
        if !self.require_frame("link") {
            return false;
        }
        let result = self.graph.get_or_create_link(id, start, end);
        let Some((key, _)) = self.check(result.map_err(UsageError::from)) else {
            return false;
        };
        if let Some(link) = self.graph.link_mut(key) {
            link.color = color;
            link.thickness = thickness;
        }
        true
    }

    // --- selection ---

    /// Select `id`. Without `append` the selection is replaced.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn select(&mut self, id: impl Into<ObjectId>, append: bool) -> bool {
        let Some(key) = self.graph.find_id(id.into()) else {
            return false;
        };
        if append {
            self.selection.select(key);
        } else {
            self.selection.set(key);
        }
        true
    }

    /// Remove `id` from the selection. Returns whether it was selected.
    pub fn deselect(&mut self, id: impl Into<ObjectId>) -> bool {
        self.graph
            .find_id(id.into())
            .is_some_and(|key| self.selection.deselect(key))
    }

    /// Flip the membership of `id`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: impl Into<ObjectId>) -> bool {
        self.graph
            .find_id(id.into())
            .is_some_and(|key| self.selection.toggle(key))
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: impl Into<ObjectId>) -> bool {
        self.graph
            .find_id(id.into())
            .is_some_and(|key| self.selection.contains(key))
    }

    /// Selected nodes, in selection order.
    pub fn selected_nodes(&self) -> Vec<NodeId> {
        self.selection
            .nodes(&self.graph)
            .filter_map(|key| match self.graph.id_of(key) {
                Some(ObjectId::Node(id)) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Selected links, in selection order.
    pub fn selected_links(&self) -> Vec<LinkId> {
        self.selection
            .links(&self.graph)
            .filter_map(|key| match self.graph.id_of(key) {
                Some(ObjectId::Link(id)) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Whether the selection changed since [`Editor::begin`].
    pub fn has_selection_changed(&self) -> bool {
        self.selection.changed()
    }

    /// Whether a node is selected.
    pub fn is_any_node_selected(&self) -> bool {
        self.selection.nodes(&self.graph).next().is_some()
    }

    /// Whether a link is selected.
    pub fn is_any_link_selected(&self) -> bool {
        self.selection.links(&self.graph).next().is_some()
    }

    // --- positions ---

    /// Screen position of node `id`'s top-left corner.
    pub fn node_position(&self, id: NodeId) -> Option<Point> {
        self.node_canvas_position(id)
            .map(|p| self.canvas.to_screen(p))
    }

    /// Canvas position of node `id`'s top-left corner.
    pub fn node_canvas_position(&self, id: NodeId) -> Option<Point> {
        let key = self.graph.find_node(id)?;
        self.graph.node(key).map(|node| node.bounds.origin())
    }

    /// Size of node `id` in canvas units, as of its last declaration.
    pub fn node_size(&self, id: NodeId) -> Option<Size> {
        let key = self.graph.find_node(id)?;
        self.graph.node(key).map(|node| node.bounds.size())
    }

    /// Move node `id` so its top-left corner lands on screen point `position`.
    pub fn set_node_position(&mut self, id: NodeId, position: Point) -> bool {
        let position = self.canvas.from_screen(position);
        self.set_node_canvas_position(id, position)
    }

    /// Move node `id` to canvas point `position`.
    ///
    /// A node never declared before is created, not live, so that its first
    /// declaration starts there.
    pub fn set_node_canvas_position(&mut self, id: NodeId, position: Point) -> bool {
        let key = match self.graph.find_node(id) {
            Some(key) => {
                self.graph.move_node(key, position);
                key
            }
            None => {
                let result = self.graph.get_or_create_node(id, position);
                let Some((key, _)) = self.check(result.map_err(UsageError::from)) else {
                    return false;
                };
                self.graph.set_live(key, false);
                key
            }
        };
        self.settings.set_node_location(id.0, position);
        debug!(node = id.0, ?key, "node positioned");
        true
    }

    /// Scroll so that canvas point `p` is at the center of the window.
    pub fn center_on(&mut self, p: Point) {
        self.view.center_on(p, self.canvas.window_screen_size());
        self.settings.mark_dirty();
    }

    // --- queries ---

    /// Nodes overlapping the screen rectangle `rect`, back to front.
    pub fn find_nodes_in_rect(&self, rect: Rect) -> Vec<NodeId> {
        self.graph
            .nodes_in_rect(self.canvas.from_screen_rect(rect))
            .into_iter()
            .filter_map(|key| match self.graph.id_of(key) {
                Some(ObjectId::Node(id)) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// Links crossing the screen rectangle `rect`.
    pub fn find_links_in_rect(&self, rect: Rect) -> Vec<LinkId> {
        let keys = self.graph.links_in_rect(self.canvas.from_screen_rect(rect));
        self.link_ids(&keys)
    }

    /// Links with an endpoint on one of node `id`'s pins.
    pub fn find_links_for_node(&self, id: NodeId) -> Vec<LinkId> {
        let Some(key) = self.graph.find_node(id) else {
            return Vec::new();
        };
        let keys = self.graph.links_for_node(key);
        self.link_ids(&keys)
    }

    fn link_ids(&self, keys: &[ObjectKey]) -> Vec<LinkId> {
        keys.iter()
            .filter_map(|key| match self.graph.id_of(*key) {
                Some(ObjectId::Link(id)) => Some(id),
                _ => None,
            })
            .collect()
    }

    // --- creation wizard ---

    /// Start a node proposal at the pointer on the next [`Editor::end`].
    pub fn arm_create(&mut self) {
        self.scheduler.arm_create();
    }

    /// Color and thickness of the link being dragged out of a pin.
    pub fn set_create_style(&mut self, color: Color, thickness: f64) {
        self.create_style = (color, thickness);
    }

    /// Open the creation wizard. Returns `false` when nothing is being created.
    ///
    /// While a proposal waits, the host must open the wizard every frame; a
    /// proposal left alone for a frame is discarded.
    pub fn begin_create(&mut self) -> bool {
        match self.scheduler.current_mut() {
            Some(Action::CreateItem(create)) => {
                create.shake_hands();
                self.create_open = true;
                true
            }
            _ => false,
        }
    }

    fn create_query<T>(
        &mut self,
        op: &'static str,
        query: impl FnOnce(&CreateItemAction, &Graph) -> Query<T>,
    ) -> Query<T> {
        if !self.create_open {
            self.report(UsageError::NoHandshake {
                op,
                wizard: "create",
            });
            return Query::Indeterminate;
        }
        match self.scheduler.current() {
            Some(Action::CreateItem(create)) => query(create, &self.graph),
            _ => Query::Indeterminate,
        }
    }

    /// The proposed link as `(start, end)` pins, start being where the drag began.
    pub fn query_new_link(&mut self) -> Query<(PinId, PinId)> {
        self.create_query("query_new_link", |create, graph| create.query_link(graph))
    }

    /// The proposed node, with the pin the drag started from, if any.
    pub fn query_new_node(&mut self) -> Query<Option<PinId>> {
        self.create_query("query_new_node", |create, graph| create.query_node(graph))
    }

    fn answer_create(&mut self, op: &'static str, answer: UserAction) -> QueryResult {
        if !self.create_open {
            self.report(UsageError::NoHandshake {
                op,
                wizard: "create",
            });
            return QueryResult::Indeterminate;
        }
        let result = match self.scheduler.current_mut() {
            Some(Action::CreateItem(create)) => create.answer(answer),
            _ => None,
        };
        result.unwrap_or_else(|| {
            self.report(UsageError::NothingPending { op });
            QueryResult::Indeterminate
        })
    }

    /// Accept the current proposal. The host declares the new item itself.
    pub fn accept_new_item(&mut self) -> QueryResult {
        self.answer_create("accept_new_item", UserAction::UserAccept)
    }

    /// Reject the current proposal.
    pub fn reject_new_item(&mut self) -> QueryResult {
        self.answer_create("reject_new_item", UserAction::UserReject)
    }

    /// Close the creation wizard.
    pub fn end_create(&mut self) {
        self.create_open = false;
    }

    /// Progress of the creation gesture.
    pub fn create_stage(&self) -> CreateStage {
        match self.scheduler.current() {
            Some(Action::CreateItem(create)) => create.stage(),
            _ => CreateStage::None,
        }
    }

    /// The link being dragged or proposed, in screen space.
    pub fn create_preview(&self) -> Option<(Point, Point)> {
        let (a, b) = self.create_preview_canvas()?;
        Some((self.canvas.to_screen(a), self.canvas.to_screen(b)))
    }

    fn create_preview_canvas(&self) -> Option<(Point, Point)> {
        match self.scheduler.current() {
            Some(Action::CreateItem(create)) => create.preview(&self.graph),
            _ => None,
        }
    }

    /// Screen position for a proposed node.
    pub fn new_node_position(&self) -> Option<Point> {
        match self.scheduler.current() {
            Some(Action::CreateItem(create)) => {
                create.drop_point().map(|p| self.canvas.to_screen(p))
            }
            _ => None,
        }
    }

    // --- deletion wizard ---

    /// Offer the selection for deletion on the next [`Editor::end`].
    pub fn arm_delete(&mut self) {
        self.scheduler.arm_delete();
    }

    /// Open the deletion wizard. Returns `false` when nothing is being deleted.
    ///
    /// Like the creation wizard, it must be opened every frame until the
    /// candidates are exhausted.
    pub fn begin_delete(&mut self) -> bool {
        match self.scheduler.current_mut() {
            Some(Action::DeleteItems(delete)) => {
                delete.shake_hands();
                self.delete_open = true;
                true
            }
            _ => false,
        }
    }

    fn next_deleted(&mut self, op: &'static str, kind: ObjectKind) -> Option<ObjectId> {
        if !self.delete_open {
            self.report(UsageError::NoHandshake {
                op,
                wizard: "delete",
            });
            return None;
        }
        let key = match self.scheduler.current_mut() {
            Some(Action::DeleteItems(delete)) => delete.next(&self.graph, kind),
            _ => None,
        }?;
        self.graph.id_of(key)
    }

    /// The next link to delete, if the next candidate is a link.
    pub fn query_deleted_link(&mut self) -> Option<LinkId> {
        match self.next_deleted("query_deleted_link", ObjectKind::Link)? {
            ObjectId::Link(id) => Some(id),
            _ => None,
        }
    }

    /// The next node to delete, if the next candidate is a node.
    pub fn query_deleted_node(&mut self) -> Option<NodeId> {
        match self.next_deleted("query_deleted_node", ObjectKind::Node)? {
            ObjectId::Node(id) => Some(id),
            _ => None,
        }
    }

    fn answer_delete(&mut self, op: &'static str, accept: bool) -> QueryResult {
        if !self.delete_open {
            self.report(UsageError::NoHandshake {
                op,
                wizard: "delete",
            });
            return QueryResult::Indeterminate;
        }
        let result = match self.scheduler.current_mut() {
            Some(Action::DeleteItems(delete)) if accept => {
                delete.accept_current(&mut self.graph, &mut self.selection)
            }
            Some(Action::DeleteItems(delete)) => delete.reject_current(),
            _ => QueryResult::Indeterminate,
        };
        if result == QueryResult::Indeterminate {
            self.report(UsageError::NothingPending { op });
        }
        result
    }

    /// Delete the candidate handed out last. A node takes its pins along and its
    /// links become candidates next.
    pub fn accept_deleted_item(&mut self) -> QueryResult {
        self.answer_delete("accept_deleted_item", true)
    }

    /// Keep the candidate handed out last.
    pub fn reject_deleted_item(&mut self) -> QueryResult {
        self.answer_delete("reject_deleted_item", false)
    }

    /// Close the deletion wizard, keeping a candidate left unanswered.
    pub fn end_delete(&mut self) {
        if let Some(Action::DeleteItems(delete)) = self.scheduler.current_mut() {
            delete.finish_turn();
        }
        self.delete_open = false;
    }

    // --- notifications and state ---

    /// Receive links the editor dropped because a pin or node they join vanished.
    pub fn set_link_dropped_callback(&mut self, callback: impl FnMut(LinkId) + 'static) {
        self.link_dropped = Some(Box::new(callback));
    }

    /// The most recent usage error.
    pub fn last_usage_error(&self) -> Option<&UsageError> {
        self.last_error.as_ref()
    }

    /// Abandon the interaction in progress and release the pointer capture.
    ///
    /// A pending proposal or deletion is dropped as if rejected.
    pub fn cancel_interaction(&mut self) {
        self.scheduler.cancel();
        self.resolver.release();
        self.create_open = false;
        self.delete_open = false;
    }

    /// The interaction in progress.
    pub fn current_action(&self) -> Option<ActionKind> {
        self.scheduler.kind()
    }

    /// Whether an action holds the pointer; the host should not treat it as idle.
    pub fn is_capturing_mouse(&self) -> bool {
        self.scheduler.is_capturing()
    }

    /// The object under the pointer at the last [`Editor::end`].
    pub fn hot_object(&self) -> Option<ObjectId> {
        self.control.hot.and_then(|key| self.graph.id_of(key))
    }

    /// Hot, active and clicked objects of the last frame.
    pub fn control(&self) -> &Control {
        &self.control
    }

    /// Scroll and zoom.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Replace scroll and zoom. A non-positive zoom is ignored.
    pub fn set_view(&mut self, view: View) {
        self.view.scroll = view.scroll;
        self.view.set_zoom(view.zoom);
        self.settings.mark_dirty();
    }

    /// Assign the zoom directly. Returns `false` for non-positive values.
    pub fn set_zoom(&mut self, zoom: f64) -> bool {
        let changed = self.view.set_zoom(zoom);
        if changed {
            self.settings.mark_dirty();
        }
        changed
    }

    /// The coordinate mapping of the current frame.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Persisted state.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The object graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Behavior knobs.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Mutable behavior knobs.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // --- painting ---

    /// Paint the canvas, nodes, links, creation preview and marquee.
    pub fn paint(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup) {
        let marquee = match self.scheduler.current() {
            Some(Action::Select(select)) => select.marquee(),
            _ => None,
        };
        Scene {
            graph: &self.graph,
            selection: &self.selection,
            control: &self.control,
            canvas: &self.canvas,
            style: &self.config.style,
            header_texture: self.config.header_texture,
            marquee,
            preview: self.create_preview_canvas(),
            preview_style: self.create_style,
        }
        .paint(draw, colors);
    }

    /// Write a diagnostic overlay of the interaction state at `origin`.
    pub fn paint_metrics(&self, draw: &mut dyn DrawList, colors: &dyn ColorLookup, origin: Point) {
        let graph = &self.graph;
        let action = self.scheduler.kind().map_or("None", ActionKind::name);
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("Action: {action}"));
        lines.push(format!("Capturing: {}", self.is_capturing_mouse()));
        lines.push(format!("Hot: {}", render::describe(graph, self.control.hot)));
        lines.push(format!(
            "Active: {}",
            render::describe(graph, self.control.active)
        ));
        lines.push(format!(
            "Clicked: {}",
            render::describe(graph, self.control.clicked)
        ));
        lines.push(format!("Selection: {}", self.selection.len()));
        match self.scheduler.current() {
            Some(Action::CreateItem(create)) => lines.push(format!(
                "Create: {:?} {:?} {:?}",
                create.stage(),
                create.item(),
                create.user_action()
            )),
            Some(Action::Scroll(scroll)) => {
                if let Some(target) = scroll.zoom_target() {
                    lines.push(format!("Zoom target: {target:.2}"));
                }
            }
            Some(Action::Drag(drag)) => {
                lines.push(format!("Dragging: {}", render::describe(graph, Some(drag.node()))));
            }
            _ => {}
        }
        lines.push(format!(
            "View: ({:.1}, {:.1}) x{:.2}",
            self.view.scroll.x, self.view.scroll.y, self.view.zoom
        ));
        render::paint_lines(draw, colors.color(StyleColor::NodeBorder), origin, &lines);
    }
}
