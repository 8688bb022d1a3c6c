// Copyright 2025 the Nodeweave Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven scenarios through the public surface.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;
use kurbo::{Point, Rect, Size};
use nodeweave_graph::{Color, LinkId, NodeId, ObjectId, PinId};

use crate::{
    ActionKind, Config, CreateStage, Editor, Input, Keys, MemoryStore, Modifiers, NodeStage,
    PointerButtons, Query, QueryResult, RecordingDrawList, Settings, StyleColor, UsageError,
};

const WINDOW: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
const PRIMARY: PointerButtons = PointerButtons::PRIMARY;

/// Node `n` has input pin `10 * n` and output pin `10 * n + 1`, a 120x20 header and
/// 20x20 pins. Node 1 sits at the origin and node 2 at (300, 0):
///
/// - node 1 spans (0, 0)-(136, 60), pin 10 anchors at (8, 42), pin 11 at (64, 42);
/// - node 2 spans (300, 0)-(436, 60), pin 20 anchors at (308, 42), pin 21 at (364, 42).
struct Harness {
    editor: Editor,
    nodes: Vec<u32>,
    links: Vec<(u32, u32, u32)>,
}

impl Harness {
    fn new() -> Self {
        Self::with_editor(Editor::default())
    }

    fn with_editor(mut editor: Editor) -> Self {
        editor.set_node_canvas_position(NodeId(2), Point::new(300.0, 0.0));
        Self {
            editor,
            nodes: vec![1, 2],
            links: Vec::new(),
        }
    }

    fn frame(&mut self, input: Input) {
        let e = &mut self.editor;
        e.begin(WINDOW, &input);
        for &id in &self.nodes {
            e.begin_node(NodeId(id));
            e.begin_header(Color::WHITE);
            e.end_header(Size::new(120.0, 20.0));
            e.begin_input(PinId(id * 10));
            e.end_input(Size::new(20.0, 20.0));
            e.begin_output(PinId(id * 10 + 1));
            e.end_output(Size::new(20.0, 20.0));
            e.end_node();
        }
        for &(id, a, b) in &self.links {
            if self.nodes.contains(&(a / 10)) && self.nodes.contains(&(b / 10)) {
                e.link(LinkId(id), PinId(a), PinId(b), Color::WHITE, 2.0);
            }
        }
        e.end();
    }

    fn hover(&mut self, x: f64, y: f64) {
        self.frame(Input::at(Point::new(x, y)));
    }

    fn gesture(
        &mut self,
        from: (f64, f64),
        to: (f64, f64),
        button: PointerButtons,
        mods: Modifiers,
    ) {
        let input = |x, y| Input::at(Point::new(x, y)).with_modifiers(mods);
        self.frame(input(from.0, from.1).with_buttons(button));
        self.frame(input(to.0, to.1).with_buttons(button));
        self.frame(input(to.0, to.1));
    }

    fn drag(&mut self, from: (f64, f64), to: (f64, f64), mods: Modifiers) {
        self.gesture(from, to, PRIMARY, mods);
    }

    fn click(&mut self, at: (f64, f64), mods: Modifiers) {
        let input = Input::at(Point::new(at.0, at.1)).with_modifiers(mods);
        self.frame(input.with_buttons(PRIMARY));
        self.frame(input);
    }

    fn sorted_nodes(&self) -> Vec<NodeId> {
        let mut nodes = self.editor.selected_nodes();
        nodes.sort();
        nodes
    }
}

#[test]
fn dragging_moves_only_the_grabbed_node_and_marks_settings_dirty() {
    let mut h = Harness::new();
    h.hover(60.0, 15.0);
    assert!(!h.editor.settings().dirty, "nothing moved yet");

    h.drag((60.0, 15.0), (100.0, 35.0), Modifiers::empty());
    assert_eq!(
        h.editor.node_canvas_position(NodeId(1)),
        Some(Point::new(40.0, 20.0))
    );
    assert_eq!(
        h.editor.node_canvas_position(NodeId(2)),
        Some(Point::new(300.0, 0.0))
    );
    assert!(h.editor.settings().dirty, "drag is persisted");
    assert_eq!(h.editor.selected_nodes(), vec![NodeId(1)]);
    assert_eq!(h.editor.current_action(), None);

    h.hover(0.0, 0.0);
    let pin = h.editor.graph().find_pin(PinId(11)).unwrap();
    assert_eq!(
        h.editor.graph().pin(pin).unwrap().drag_point,
        Point::new(104.0, 62.0),
        "pins follow the node"
    );
}

#[test]
fn dragging_a_selected_node_moves_the_selection() {
    let mut h = Harness::new();
    h.hover(0.0, 0.0);
    assert!(h.editor.select(NodeId(1), false), "known node");
    assert!(h.editor.select(NodeId(2), true), "known node");
    h.drag((60.0, 15.0), (70.0, 45.0), Modifiers::empty());
    assert_eq!(
        h.editor.node_canvas_position(NodeId(1)),
        Some(Point::new(10.0, 30.0))
    );
    assert_eq!(
        h.editor.node_canvas_position(NodeId(2)),
        Some(Point::new(310.0, 30.0))
    );
}

#[test]
fn one_action_owns_the_frame() {
    let mut h = Harness::new();
    h.frame(Input::at(Point::new(60.0, 15.0)).with_buttons(PRIMARY));
    h.frame(Input::at(Point::new(90.0, 15.0)).with_buttons(PRIMARY));
    assert_eq!(h.editor.current_action(), Some(ActionKind::Drag));
    assert!(h.editor.is_capturing_mouse(), "drag holds the pointer");

    // Wheel input would start a zoom, but the drag keeps the frame.
    h.frame(
        Input::at(Point::new(95.0, 15.0))
            .with_buttons(PRIMARY)
            .with_wheel(1.0),
    );
    assert_eq!(h.editor.current_action(), Some(ActionKind::Drag));
    assert_eq!(h.editor.view().zoom, 1.0);

    h.frame(Input::at(Point::new(95.0, 15.0)));
    assert_eq!(h.editor.current_action(), None);
    assert!(!h.editor.is_capturing_mouse(), "released");
}

#[test]
fn additive_marquee_passes_match_a_single_pass() {
    let mut twice = Harness::new();
    twice.drag((10.0, 200.0), (20.0, 30.0), Modifiers::SHIFT);
    assert_eq!(twice.sorted_nodes(), vec![NodeId(1)]);
    twice.drag((310.0, 200.0), (320.0, 30.0), Modifiers::SHIFT);

    let mut once = Harness::new();
    once.drag((10.0, 200.0), (320.0, 30.0), Modifiers::empty());

    assert_eq!(twice.sorted_nodes(), vec![NodeId(1), NodeId(2)]);
    assert_eq!(twice.sorted_nodes(), once.sorted_nodes());
}

#[test]
fn replacing_marquee_drops_the_previous_selection() {
    let mut h = Harness::new();
    h.click((60.0, 15.0), Modifiers::empty());
    assert_eq!(h.editor.selected_nodes(), vec![NodeId(1)]);
    h.drag((310.0, 200.0), (320.0, 30.0), Modifiers::empty());
    assert_eq!(h.editor.selected_nodes(), vec![NodeId(2)]);
}

#[test]
fn toggling_twice_restores_membership() {
    let mut h = Harness::new();
    h.click((60.0, 15.0), Modifiers::empty());
    assert_eq!(h.editor.selected_nodes(), vec![NodeId(1)]);

    h.click((360.0, 15.0), Modifiers::CTRL);
    assert_eq!(h.sorted_nodes(), vec![NodeId(1), NodeId(2)]);
    h.click((360.0, 15.0), Modifiers::CTRL);
    assert_eq!(h.sorted_nodes(), vec![NodeId(1)]);

    assert!(!h.editor.toggle(NodeId(1)), "now deselected");
    assert!(h.editor.toggle(NodeId(1)), "selected again");
    assert_eq!(h.sorted_nodes(), vec![NodeId(1)]);
}

#[test]
fn clicking_empty_canvas_clears_the_selection() {
    let mut h = Harness::new();
    h.click((60.0, 15.0), Modifiers::empty());
    assert!(h.editor.is_any_node_selected(), "clicked node");
    assert!(h.editor.has_selection_changed(), "changed on the release frame");
    h.hover(60.0, 15.0);
    assert!(!h.editor.has_selection_changed(), "reset by begin");
    h.click((500.0, 400.0), Modifiers::SHIFT);
    assert!(h.editor.is_any_node_selected(), "shift keeps the selection");
    h.click((500.0, 400.0), Modifiers::empty());
    assert!(!h.editor.is_any_node_selected(), "plain click clears");
}

#[test]
fn clicking_a_link_selects_it() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.click((186.0, 42.0), Modifiers::empty());
    assert_eq!(h.editor.selected_links(), vec![LinkId(100)]);
    assert!(h.editor.is_any_link_selected(), "link selected");
    assert!(!h.editor.is_any_node_selected(), "nodes untouched");
}

#[test]
fn link_marquee_collects_links() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.links.push((101, 21, 10));
    h.hover(0.0, 0.0);
    // Both links lie on y = 42; the marquee straddles that line.
    h.drag((186.0, 42.8), (200.0, 20.0), Modifiers::empty());
    let mut links = h.editor.selected_links();
    links.sort();
    assert_eq!(links, vec![LinkId(100), LinkId(101)]);
}

fn drag_link(h: &mut Harness, from: (f64, f64), to: (f64, f64)) {
    h.frame(Input::at(Point::new(from.0, from.1)).with_buttons(PRIMARY));
    h.frame(Input::at(Point::new(200.0, 300.0)).with_buttons(PRIMARY));
    assert_eq!(h.editor.create_stage(), CreateStage::Possible);
    assert!(h.editor.create_preview().is_some(), "link follows the pointer");
    h.frame(Input::at(Point::new(to.0, to.1)).with_buttons(PRIMARY));
    h.frame(Input::at(Point::new(to.0, to.1)));
}

#[test]
fn dropping_on_a_compatible_pin_proposes_a_link() {
    let mut h = Harness::new();
    drag_link(&mut h, (54.0, 42.0), (318.0, 42.0));
    assert_eq!(h.editor.create_stage(), CreateStage::Create);

    assert!(h.editor.begin_create(), "wizard opens");
    assert_eq!(
        h.editor.query_new_link(),
        Query::True((PinId(11), PinId(20)))
    );
    assert!(h.editor.query_new_node().is_indeterminate(), "not a node");
    assert_eq!(h.editor.accept_new_item(), QueryResult::True);
    assert_eq!(h.editor.reject_new_item(), QueryResult::False);
    h.editor.end_create();

    h.links.push((100, 11, 20));
    h.hover(318.0, 42.0);
    assert_eq!(h.editor.create_stage(), CreateStage::None);
    assert!(h.editor.graph().find_link(LinkId(100)).is_some(), "host declared it");
}

#[test]
fn rejected_proposal_queries_false() {
    let mut h = Harness::new();
    drag_link(&mut h, (54.0, 42.0), (318.0, 42.0));
    assert!(h.editor.begin_create(), "wizard opens");
    assert_eq!(h.editor.reject_new_item(), QueryResult::True);
    assert_eq!(
        h.editor.query_new_link(),
        Query::False((PinId(11), PinId(20)))
    );
    assert_eq!(h.editor.accept_new_item(), QueryResult::False);
    h.editor.end_create();
    h.hover(318.0, 42.0);
    assert_eq!(h.editor.current_action(), None);
}

#[test]
fn dropping_back_on_the_start_pin_is_a_no_op() {
    let mut h = Harness::new();
    drag_link(&mut h, (54.0, 42.0), (54.0, 42.0));
    assert_eq!(h.editor.create_stage(), CreateStage::None);
    assert!(!h.editor.begin_create(), "nothing to answer");

    assert!(h.editor.query_new_link().is_indeterminate(), "no wizard");
    assert!(matches!(
        h.editor.last_usage_error(),
        Some(UsageError::NoHandshake { wizard: "create", .. })
    ));
}

#[test]
fn pins_of_one_node_never_link() {
    let mut h = Harness::new();
    drag_link(&mut h, (18.0, 42.0), (54.0, 42.0));
    assert_eq!(h.editor.create_stage(), CreateStage::None);
}

#[test]
fn duplicate_links_are_not_proposed() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    drag_link(&mut h, (318.0, 42.0), (54.0, 42.0));
    assert_eq!(h.editor.create_stage(), CreateStage::None);
}

#[test]
fn pins_can_be_linked_again_once_the_host_drops_their_link() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.hover(0.0, 0.0);
    h.links.clear();
    h.hover(0.0, 0.0);
    h.hover(0.0, 0.0);
    assert!(h.editor.find_links_for_node(NodeId(1)).is_empty(), "no longer declared");

    drag_link(&mut h, (54.0, 42.0), (318.0, 42.0));
    assert_eq!(h.editor.create_stage(), CreateStage::Create);
    assert!(h.editor.begin_create(), "wizard opens");
    assert_eq!(
        h.editor.query_new_link(),
        Query::True((PinId(11), PinId(20)))
    );
    h.editor.end_create();
}

#[test]
fn dropping_on_empty_canvas_proposes_a_node() {
    let mut h = Harness::new();
    drag_link(&mut h, (54.0, 42.0), (500.0, 400.0));
    assert!(h.editor.begin_create(), "wizard opens");
    assert_eq!(h.editor.query_new_node(), Query::True(Some(PinId(11))));
    assert!(h.editor.query_new_link().is_indeterminate(), "not a link");
    assert_eq!(h.editor.new_node_position(), Some(Point::new(500.0, 400.0)));
    assert_eq!(h.editor.accept_new_item(), QueryResult::True);
    h.editor.end_create();
}

#[test]
fn unanswered_proposals_are_discarded() {
    let mut h = Harness::new();
    h.hover(500.0, 400.0);
    h.editor.arm_create();
    h.hover(500.0, 400.0);
    assert_eq!(h.editor.create_stage(), CreateStage::Create);

    // Answered frames keep the proposal alive.
    assert!(h.editor.begin_create(), "armed proposal");
    assert_eq!(h.editor.query_new_node(), Query::True(None));
    h.editor.end_create();
    h.hover(500.0, 400.0);
    assert_eq!(h.editor.create_stage(), CreateStage::Create);

    // A skipped frame drops it.
    h.hover(500.0, 400.0);
    assert_eq!(h.editor.create_stage(), CreateStage::None);
    assert_eq!(h.editor.current_action(), None);
}

/// Answer the deletion wizard by accepting everything; returns what was offered.
fn accept_all_deletions(h: &mut Harness) -> Vec<ObjectId> {
    let mut offered = Vec::new();
    if !h.editor.begin_delete() {
        return offered;
    }
    while let Some(link) = h.editor.query_deleted_link() {
        offered.push(ObjectId::Link(link));
        assert_eq!(h.editor.accept_deleted_item(), QueryResult::True);
        h.links.retain(|(id, _, _)| *id != link.0);
    }
    while let Some(node) = h.editor.query_deleted_node() {
        offered.push(ObjectId::Node(node));
        assert_eq!(h.editor.accept_deleted_item(), QueryResult::True);
        h.nodes.retain(|id| *id != node.0);
    }
    h.editor.end_delete();
    offered
}

#[test]
fn deletion_offers_links_then_nodes_then_incident_links() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.links.push((101, 21, 10));
    h.hover(0.0, 0.0);
    assert!(h.editor.select(LinkId(100), false), "known link");
    assert!(h.editor.select(NodeId(2), true), "known node");
    h.editor.arm_delete();

    let mut offered = Vec::new();
    for _ in 0..4 {
        h.hover(0.0, 0.0);
        offered.extend(accept_all_deletions(&mut h));
    }
    assert_eq!(
        offered,
        vec![
            ObjectId::Link(LinkId(100)),
            ObjectId::Node(NodeId(2)),
            ObjectId::Link(LinkId(101)),
        ]
    );
    assert_eq!(h.editor.current_action(), None);
    assert!(h.editor.graph().find_node(NodeId(2)).is_none(), "node gone");
    assert!(h.editor.graph().find_pin(PinId(21)).is_none(), "pins gone");
    assert!(h.editor.graph().find_link(LinkId(101)).is_none(), "link gone");
    assert!(h.editor.graph().find_node(NodeId(1)).is_some(), "node 1 kept");
}

#[test]
fn rejected_incident_links_are_dropped_and_reported() {
    let dropped = Rc::new(RefCell::new(Vec::new()));
    let mut h = Harness::new();
    let sink = dropped.clone();
    h.editor
        .set_link_dropped_callback(move |id| sink.borrow_mut().push(id));
    h.links.push((100, 11, 20));
    h.hover(0.0, 0.0);
    h.editor.select(NodeId(2), false);
    h.editor.arm_delete();
    h.hover(0.0, 0.0);

    assert!(h.editor.begin_delete(), "armed");
    assert_eq!(h.editor.query_deleted_link(), None);
    assert_eq!(h.editor.query_deleted_node(), Some(NodeId(2)));
    assert_eq!(h.editor.accept_deleted_item(), QueryResult::True);
    h.nodes.retain(|id| *id != 2);
    h.editor.end_delete();

    h.hover(0.0, 0.0);
    assert!(h.editor.begin_delete(), "incident link pending");
    assert_eq!(h.editor.query_deleted_link(), Some(LinkId(100)));
    assert_eq!(h.editor.reject_deleted_item(), QueryResult::True);
    h.editor.end_delete();
    assert!(dropped.borrow().is_empty(), "still decided by the host");

    h.hover(0.0, 0.0);
    assert_eq!(*dropped.borrow(), vec![LinkId(100)]);
    assert!(h.editor.graph().find_link(LinkId(100)).is_none(), "pruned");
}

#[test]
fn querying_again_rejects_the_unanswered_candidate() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.hover(0.0, 0.0);
    h.editor.select(LinkId(100), false);
    h.editor.select(NodeId(1), true);
    h.editor.arm_delete();
    h.hover(0.0, 0.0);

    assert!(h.editor.begin_delete(), "armed");
    assert_eq!(h.editor.query_deleted_link(), Some(LinkId(100)));
    assert_eq!(h.editor.query_deleted_node(), Some(NodeId(1)));
    assert_eq!(h.editor.reject_deleted_item(), QueryResult::True);
    assert_eq!(h.editor.reject_deleted_item(), QueryResult::Indeterminate);
    h.editor.end_delete();
    assert!(h.editor.graph().find_link(LinkId(100)).is_some(), "kept");
    assert!(h.editor.graph().find_node(NodeId(1)).is_some(), "kept");
}

#[test]
fn deletion_passes_over_links_the_host_already_dropped() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.hover(0.0, 0.0);
    h.editor.select(LinkId(100), false);
    h.editor.select(NodeId(1), true);
    h.editor.arm_delete();
    h.hover(0.0, 0.0);
    assert!(h.editor.begin_delete(), "armed");
    h.editor.end_delete();

    h.links.clear();
    h.hover(0.0, 0.0);
    assert!(h.editor.begin_delete(), "node 1 still pending");
    assert_eq!(h.editor.query_deleted_link(), None);
    assert_eq!(h.editor.query_deleted_node(), Some(NodeId(1)));
    assert_eq!(h.editor.accept_deleted_item(), QueryResult::True);
    assert_eq!(h.editor.query_deleted_link(), None, "link 100 was not incident");
    h.editor.end_delete();
}

#[test]
fn delete_key_arms_deletion() {
    let mut h = Harness::new();
    h.click((60.0, 15.0), Modifiers::empty());
    h.frame(Input::at(Point::new(60.0, 15.0)).with_keys(Keys::DELETE));
    assert_eq!(h.editor.current_action(), Some(ActionKind::DeleteItems));

    // Nobody answers: the deletion is dropped and node 1 survives.
    h.hover(60.0, 15.0);
    assert_eq!(h.editor.current_action(), None);
    assert!(h.editor.graph().find_node(NodeId(1)).is_some(), "kept");
}

#[test]
fn end_node_without_begin_node_is_reported() {
    let mut h = Harness::new();
    h.hover(0.0, 0.0);
    let before = h.editor.node_size(NodeId(1));

    h.editor.begin(WINDOW, &Input::default());
    assert!(!h.editor.end_node(), "nothing open");
    assert_eq!(
        h.editor.last_usage_error(),
        Some(&UsageError::Stage {
            op: "end_node",
            stage: NodeStage::Invalid
        })
    );
    h.editor.end();
    assert_eq!(h.editor.node_size(NodeId(1)), before);
}

#[test]
fn reusing_an_id_for_another_kind_is_reported() {
    let mut h = Harness::new();
    h.hover(0.0, 0.0);
    h.editor.begin(WINDOW, &Input::default());
    h.editor.begin_node(NodeId(3));
    h.editor.begin_content();
    assert!(!h.editor.begin_input(PinId(1)), "1 names a node");
    assert!(matches!(
        h.editor.last_usage_error(),
        Some(UsageError::Graph(_))
    ));
    h.editor.end_node();
    h.editor.end();
}

#[test]
fn panning_moves_the_view_by_the_pointer_delta() {
    let mut h = Harness::new();
    h.gesture(
        (400.0, 300.0),
        (450.0, 320.0),
        PointerButtons::MIDDLE,
        Modifiers::empty(),
    );
    assert_eq!(h.editor.view().scroll, kurbo::Vec2::new(-50.0, -20.0));
    h.hover(0.0, 0.0);
    assert_eq!(h.editor.node_position(NodeId(1)), Some(Point::new(50.0, 20.0)));
    assert_eq!(h.editor.current_action(), None);
}

#[test]
fn pan_button_click_leaves_the_selection_alone() {
    let mut h = Harness::new();
    let at = Input::at(Point::new(60.0, 15.0));
    h.frame(at.with_buttons(PointerButtons::MIDDLE));
    h.frame(at);
    assert!(h.editor.selected_nodes().is_empty(), "pan button never selects");
    assert_eq!(h.editor.current_action(), None);
}

#[test]
fn wheel_zoom_keeps_the_point_under_the_pointer() {
    let mut h = Harness::new();
    let pointer = Point::new(200.0, 100.0);
    h.frame(Input::at(pointer));
    let before = h.editor.canvas().from_screen(pointer);

    h.frame(Input::at(pointer).with_wheel(1.0));
    assert_eq!(h.editor.current_action(), Some(ActionKind::Scroll));
    assert_eq!(h.editor.view().zoom, 1.25);

    h.frame(Input::at(pointer));
    assert_eq!(h.editor.current_action(), None);
    let after = h.editor.canvas().from_screen(pointer);
    assert!((after - before).hypot2() < 1e-18, "{before:?} vs {after:?}");
}

#[test]
fn suspension_freezes_interaction() {
    let mut h = Harness::new();
    h.hover(60.0, 15.0);
    h.editor
        .begin(WINDOW, &Input::at(Point::new(60.0, 15.0)).with_buttons(PRIMARY));
    h.editor.suspend();
    assert!(h.editor.is_suspended(), "suspended");
    h.editor.resume();
    h.editor.end();
    assert_eq!(h.editor.control().active, None, "press was not seen");

    h.editor.resume();
    assert_eq!(
        h.editor.last_usage_error(),
        Some(&UsageError::Unbalanced { op: "resume" })
    );
}

#[test]
fn settings_are_saved_and_swept() {
    let mut stored = Settings::default();
    stored.touch(1, Point::new(20.0, 10.0));
    stored.touch(9, Point::new(5.0, 5.0));
    let handle = MemoryStore::with_settings(stored);

    let mut h = Harness::with_editor(Editor::with_store(Config::default(), handle.clone()));
    h.hover(0.0, 0.0);
    assert_eq!(
        h.editor.node_canvas_position(NodeId(1)),
        Some(Point::new(20.0, 10.0))
    );
    assert_eq!(handle.saves(), 0, "nothing changed");

    h.drag((80.0, 25.0), (90.0, 25.0), Modifiers::empty());
    assert!(handle.saves() >= 1, "drag saved");
    let saved = handle.saved().unwrap();
    assert_eq!(saved.node(1).unwrap().location, Point::new(30.0, 10.0));
    assert!(saved.node(9).is_none(), "unused entry swept");
    assert!(!h.editor.settings().dirty, "clean after save");
}

#[test]
fn setting_a_position_before_the_first_declaration() {
    let mut h = Harness::new();
    h.nodes.push(3);
    assert!(h.editor.set_node_position(NodeId(3), Point::new(100.0, 200.0)), "created");
    assert!(
        h.editor
            .find_nodes_in_rect(Rect::new(90.0, 190.0, 110.0, 210.0))
            .is_empty(),
        "not live yet"
    );
    h.hover(0.0, 0.0);
    assert_eq!(h.editor.node_position(NodeId(3)), Some(Point::new(100.0, 200.0)));
    assert_eq!(
        h.editor.find_nodes_in_rect(Rect::new(90.0, 190.0, 110.0, 210.0)),
        vec![NodeId(3)]
    );
}

#[test]
fn find_queries_use_screen_space() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.links.push((101, 21, 10));
    h.editor.set_view(nodeweave_canvas::View {
        scroll: kurbo::Vec2::new(100.0, 0.0),
        zoom: 1.0,
    });
    h.hover(0.0, 0.0);
    // Node 2 is now at screen x 200.
    assert_eq!(
        h.editor.find_nodes_in_rect(Rect::new(190.0, 0.0, 210.0, 10.0)),
        vec![NodeId(2)]
    );
    let mut links = h.editor.find_links_for_node(NodeId(1));
    links.sort();
    assert_eq!(links, vec![LinkId(100), LinkId(101)]);
    assert!(h.editor.find_links_in_rect(Rect::new(0.0, 0.0, 0.0, 0.0)).is_empty(), "zero area");
}

#[test]
fn painting_emits_scene_and_metrics() {
    let mut h = Harness::new();
    h.links.push((100, 11, 20));
    h.click((60.0, 15.0), Modifiers::empty());

    let colors = |role: StyleColor| match role {
        StyleColor::SelNodeBorder => Color::from_rgba8(255, 180, 0, 255),
        _ => Color::WHITE,
    };
    let mut draw = RecordingDrawList::default();
    h.editor.paint(&mut draw, &colors);
    assert!(draw.line_count() >= 1, "link and grid lines");
    assert!(
        draw.commands.iter().any(|c| matches!(
            c,
            crate::DrawCommand::StrokeRect { color, .. }
                if *color == Color::from_rgba8(255, 180, 0, 255)
        )),
        "selected border"
    );

    let mut overlay = RecordingDrawList::default();
    h.editor
        .paint_metrics(&mut overlay, &colors, Point::new(10.0, 10.0));
    let texts: Vec<&str> = overlay.texts().collect();
    assert_eq!(texts[0], "Action: None");
    assert!(texts.contains(&"Selection: 1"), "{texts:?}");
}
