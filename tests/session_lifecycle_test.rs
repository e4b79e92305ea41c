//! Session supersession, failure, listener lifecycle and document reset.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use common::{hit, supervisor};
use docsearch::{SearchOptions, SupervisorState};

#[test]
fn stale_callbacks_are_dropped_including_document_end() {
    let (mut sup, log, ui) = supervisor();
    ui.borrow_mut().set_results_panel_open(true);

    sup.search_all("cat");
    let old_session = log.borrow().last_session();
    old_session.found(hit(1, 0.0));

    // Supersede before the old session's events are pumped.
    sup.search_all("dog");
    let new_session = log.borrow().last_session();
    old_session.document_end();
    new_session.found(hit(9, 0.0));
    sup.pump();

    // Only the new session's match survives, and the stale document_end did
    // not clear the searching flag for the new session.
    let pages: Vec<u32> = sup.matches().iter().map(|m| m.page_number).collect();
    assert_eq!(pages, vec![9]);
    assert!(sup.is_searching());
    assert_eq!(sup.state(), SupervisorState::FullSearching);

    // Late stragglers from the dead session stay inert.
    old_session.found(hit(2, 0.0));
    sup.pump();
    assert_eq!(sup.match_count(), 1);
}

#[test]
fn provider_error_surfaces_message_and_supervisor_recovers() {
    let (mut sup, log, ui) = supervisor();

    sup.search_now("cat");
    log.borrow().last_session().error("engine exploded");
    sup.pump();

    assert!(!sup.is_searching());
    assert_eq!(sup.state(), SupervisorState::Idle);
    let message = ui.borrow().last_error().unwrap().to_string();
    assert!(message.contains("engine exploded"));

    // A failure never wedges the supervisor.
    sup.search_now("cat");
    assert_eq!(log.borrow().started.len(), 2);
    assert!(sup.is_searching());
}

#[test]
fn settle_notifies_listeners_in_order_with_term_options_and_matches() {
    let (mut sup, log, ui) = supervisor();
    ui.borrow_mut().set_options(SearchOptions {
        case_sensitive: true,
        ..Default::default()
    });

    let calls: Rc<RefCell<Vec<(String, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let first = calls.clone();
    sup.add_listener(move |term, options, matches| {
        assert!(options.case_sensitive);
        first.borrow_mut().push((format!("a:{term}"), matches.len()));
    });
    let second = calls.clone();
    sup.add_listener(move |term, _, matches| {
        second.borrow_mut().push((format!("b:{term}"), matches.len()));
    });

    sup.search_all("cat");
    let session = log.borrow().last_session();
    session.found(hit(1, 0.0));
    session.found(hit(2, 0.0));
    session.document_end();
    sup.pump();

    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![("a:cat".to_string(), 2), ("b:cat".to_string(), 2)]
    );
}

#[test]
fn full_session_notifies_exactly_once_even_with_empty_results() {
    let (mut sup, log, _ui) = supervisor();

    let count = Rc::new(RefCell::new(0usize));
    let counter = count.clone();
    sup.add_listener(move |_, _, matches| {
        assert!(matches.is_empty());
        *counter.borrow_mut() += 1;
    });

    sup.search_all("xyz");
    log.borrow().last_session().document_end();
    sup.pump();
    sup.pump();

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn panicking_listener_does_not_block_later_listeners() {
    let (mut sup, log, _ui) = supervisor();

    sup.add_listener(|_, _, _| panic!("listener boom"));
    let reached = Rc::new(RefCell::new(false));
    let flag = reached.clone();
    sup.add_listener(move |_, _, _| {
        *flag.borrow_mut() = true;
    });

    sup.search_all("cat");
    log.borrow().last_session().document_end();
    sup.pump();

    assert!(*reached.borrow());
}

#[test]
fn removed_listener_is_not_invoked() {
    let (mut sup, log, _ui) = supervisor();

    let hits = Rc::new(RefCell::new(0usize));
    let counter = hits.clone();
    let id = sup.add_listener(move |_, _, _| {
        *counter.borrow_mut() += 1;
    });
    assert!(sup.remove_listener(id));

    sup.search_all("cat");
    log.borrow().last_session().document_end();
    sup.pump();

    assert_eq!(*hits.borrow(), 0);
}

#[test]
fn option_toggle_relaunches_single_session_when_panel_is_closed() {
    let (mut sup, log, ui) = supervisor();

    sup.search_now("cat");
    let session = log.borrow().last_session();
    session.found(hit(1, 0.0));
    session.document_end();
    sup.pump();
    assert_eq!(sup.match_count(), 1);

    ui.borrow_mut().set_options(SearchOptions {
        whole_word: true,
        ..Default::default()
    });
    sup.on_option_toggle();

    let log = log.borrow();
    assert_eq!(log.started.len(), 2);
    assert!(!log.started[1].full_search);
    // Results were cleared before the relaunch; the new session owns them.
    assert_eq!(sup.match_count(), 0);
}

#[test]
fn blank_term_never_reaches_the_provider() {
    let (mut sup, log, _ui) = supervisor();

    sup.on_term_change("   ");
    thread::sleep(Duration::from_millis(20));
    sup.poll_debounce();

    let log = log.borrow();
    assert!(log.started.is_empty());
    assert!(log.clear_calls >= 1);
}

#[test]
fn single_session_notifies_listeners_on_every_found() {
    let (mut sup, log, _ui) = supervisor();

    let calls: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
    let pages = calls.clone();
    sup.add_listener(move |_, _, matches| {
        pages.borrow_mut().push(matches[0].page_number);
    });

    sup.search_now("cat");
    let session = log.borrow().last_session();
    session.found(hit(3, 0.0));
    session.found(hit(7, 0.0));
    session.document_end();
    sup.pump();

    // Both founds reach the listeners; only the first becomes active.
    assert_eq!(*calls.borrow(), vec![3, 3]);
    assert_eq!(sup.active_index(), Some(0));
    assert_eq!(log.borrow().shown.len(), 1);
}

#[test]
fn blank_term_change_clears_stale_no_result_flag() {
    let (mut sup, log, _ui) = supervisor();

    sup.search_now("xyz");
    log.borrow().last_session().document_end();
    sup.pump();
    assert!(sup.single_no_result());

    sup.on_term_change("");
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert!(!sup.single_no_result());
}

#[test]
fn programmatic_blank_search_returns_to_idle_without_a_new_session() {
    let (mut sup, log, _ui) = supervisor();

    sup.search_now("cat");
    let session = log.borrow().last_session();
    session.found(hit(1, 0.0));
    session.document_end();
    sup.pump();
    assert_eq!(sup.state(), SupervisorState::SingleFound);

    sup.search_now("   ");
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert!(!sup.is_searching());
    assert_eq!(log.borrow().started.len(), 1);

    sup.search_all("cat");
    log.borrow().last_session().document_end();
    sup.pump();
    assert_eq!(sup.state(), SupervisorState::FullSettled);

    sup.search_all("");
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert!(!sup.no_result());
    assert_eq!(log.borrow().started.len(), 2);
}

#[test]
fn document_close_reset_returns_to_idle_and_kills_in_flight_sessions() {
    let (mut sup, log, _ui) = supervisor();

    sup.search_all("cat");
    let session = log.borrow().last_session();
    session.found(hit(1, 0.0));
    sup.pump();
    assert_eq!(sup.match_count(), 1);

    sup.reset();
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert_eq!(sup.term(), "");
    assert_eq!(sup.match_count(), 0);
    assert!(!sup.is_searching());

    // The old session's completion arrives after the reset and is ignored.
    session.document_end();
    sup.pump();
    assert_eq!(sup.state(), SupervisorState::Idle);
    assert!(!sup.no_result());
}
