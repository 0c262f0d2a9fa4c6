use std::cell::RefCell;
use std::rc::Rc;

use crate::catalog::criteria::CriteriaState;
use crate::catalog::options::{origin_options, taxa_options};
use crate::catalog::view::{FocusTarget, GalleryView};
use crate::catalog::{filter, OriginStatus, RecordStore};
use crate::controls::{
    GlobalListener, Key, ListenerRegistry, SearchInput, SelectControl, SelectEvent,
};

#[derive(Clone, Default)]
struct SharedRegistry {
    inner: Rc<RefCell<RegistryLog>>,
}

#[derive(Default)]
struct RegistryLog {
    active: Vec<GlobalListener>,
    attaches: usize,
    detaches: usize,
}

impl SharedRegistry {
    fn active_count(&self) -> usize {
        self.inner.borrow().active.len()
    }

    fn attaches(&self) -> usize {
        self.inner.borrow().attaches
    }

    fn detaches(&self) -> usize {
        self.inner.borrow().detaches
    }
}

impl ListenerRegistry for SharedRegistry {
    fn attach(&mut self, listener: GlobalListener) {
        let mut log = self.inner.borrow_mut();
        log.active.push(listener);
        log.attaches += 1;
    }

    fn detach(&mut self, listener: GlobalListener) {
        let mut log = self.inner.borrow_mut();
        log.active.retain(|l| *l != listener);
        log.detaches += 1;
    }
}

fn sample_select(registry: SharedRegistry) -> SelectControl<SharedRegistry> {
    let store = RecordStore::sample();
    SelectControl::new(taxa_options(store.records()), registry)
}

#[test]
fn clear_all_restores_full_store_and_focuses_search() {
    let search = Rc::new(RefCell::new(SearchInput::default()));
    search.borrow_mut().set_value("snake");

    let mut view = GalleryView::new(RecordStore::sample());
    view.set_search_handle(Box::new(search.clone()));
    view.set_search("snake");
    view.set_taxa("Reptiles");
    assert_eq!(view.filtered().len(), 1);

    view.clear_all();
    assert_eq!(view.filtered().len(), view.store().len());
    assert!(view.criteria().is_unconstrained());
    assert!(search.borrow().value().is_empty());
    assert!(search.borrow().is_focused());
}

#[test]
fn clear_all_is_idempotent() {
    let mut view = GalleryView::new(RecordStore::sample());
    view.set_search("wren");
    view.clear_all();
    let after_once = (view.criteria().clone(), view.filtered().to_vec());
    view.clear_all();
    assert_eq!(view.criteria(), &after_once.0);
    assert_eq!(view.filtered(), after_once.1.as_slice());
}

#[test]
fn clear_filters_keeps_search_and_defers_focus() {
    let first_filter = Rc::new(RefCell::new(SearchInput::default()));

    let mut view = GalleryView::new(RecordStore::sample());
    view.set_first_filter_handle(Box::new(first_filter.clone()));
    view.set_search("eastern");
    view.set_taxa("Reptiles");
    view.set_origin("Native");

    view.clear_filters();
    assert_eq!(view.criteria().search, "eastern");
    assert!(view.criteria().taxa.is_empty());
    assert!(view.criteria().origin.is_empty());
    // Two "Eastern ..." records remain once the categoricals are gone.
    assert_eq!(view.filtered().len(), 2);

    // Focus waits for the next refresh, once the control is interactable.
    assert_eq!(view.pending_focus(), Some(FocusTarget::FirstFilter));
    assert!(!first_filter.borrow().is_focused());
    view.refresh();
    assert!(first_filter.borrow().is_focused());
    assert_eq!(view.pending_focus(), None);
}

#[test]
fn clear_filters_is_idempotent() {
    let mut view = GalleryView::new(RecordStore::sample());
    view.set_search("eastern");
    view.set_species("Kangaroo");
    view.clear_filters();
    view.refresh();
    let after_once = (view.criteria().clone(), view.filtered().to_vec());
    view.clear_filters();
    view.refresh();
    assert_eq!(view.criteria(), &after_once.0);
    assert_eq!(view.filtered(), after_once.1.as_slice());
}

#[test]
fn multi_facet_result_is_intersection_of_single_facets() {
    let store = RecordStore::sample();

    let search_only = CriteriaState {
        search: "eastern".to_string(),
        ..Default::default()
    };
    let taxa_only = CriteriaState {
        taxa: "Reptiles".to_string(),
        ..Default::default()
    };
    let both = CriteriaState {
        search: "eastern".to_string(),
        taxa: "Reptiles".to_string(),
        ..Default::default()
    };

    let by_search = filter::apply(store.records(), &search_only);
    let by_taxa = filter::apply(store.records(), &taxa_only);
    let by_both = filter::apply(store.records(), &both);

    let intersection: Vec<_> = by_search
        .iter()
        .filter(|r| by_taxa.iter().any(|t| t.id == r.id))
        .cloned()
        .collect();
    assert_eq!(by_both, intersection);
}

#[test]
fn view_recomputes_on_every_criteria_change() {
    let mut view = GalleryView::new(RecordStore::sample());
    assert_eq!(view.filtered().len(), 3);
    view.set_taxa("Birds");
    assert_eq!(view.filtered().len(), 1);
    view.set_taxa("");
    assert_eq!(view.filtered().len(), 3);
    view.set_origin(OriginStatus::NonNative.label());
    assert!(view.filtered().is_empty());
}

#[test]
fn select_opens_on_trigger_and_acquires_listeners() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    assert!(!select.is_open());
    assert_eq!(registry.active_count(), 0);

    select.handle(SelectEvent::TriggerClick);
    assert!(select.is_open());
    assert_eq!(registry.active_count(), GlobalListener::ALL.len());
}

#[test]
fn select_toggles_with_enter_and_space() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());

    select.handle(SelectEvent::KeyDown(Key::Enter));
    assert!(select.is_open());
    select.handle(SelectEvent::KeyDown(Key::Space));
    assert!(!select.is_open());
    assert_eq!(registry.active_count(), 0);
}

#[test]
fn every_dismissal_path_releases_all_listeners() {
    let dismissals = [
        SelectEvent::OutsidePointerDown,
        SelectEvent::Scroll,
        SelectEvent::Resize,
        SelectEvent::KeyDown(Key::Escape),
        SelectEvent::OptionClick(0),
    ];
    for dismissal in dismissals {
        let registry = SharedRegistry::default();
        let mut select = sample_select(registry.clone());
        select.handle(SelectEvent::TriggerClick);
        assert_eq!(registry.active_count(), GlobalListener::ALL.len());

        select.handle(dismissal);
        assert!(!select.is_open(), "still open after {dismissal:?}");
        assert_eq!(registry.active_count(), 0, "listeners leaked by {dismissal:?}");
        assert_eq!(registry.attaches(), registry.detaches());
    }
}

#[test]
fn inside_pointer_down_keeps_menu_open() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    select.handle(SelectEvent::TriggerClick);
    select.handle(SelectEvent::InsidePointerDown);
    assert!(select.is_open());
}

#[test]
fn option_selection_reports_value_and_closes() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    select.handle(SelectEvent::TriggerClick);

    let chosen = select.handle(SelectEvent::OptionClick(1));
    assert_eq!(chosen.as_deref(), Some("Birds"));
    assert_eq!(select.value(), "Birds");
    assert_eq!(select.selected_label(), Some("Birds"));
    assert!(!select.is_open());
}

#[test]
fn option_click_while_closed_is_ignored() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    assert_eq!(select.handle(SelectEvent::OptionClick(0)), None);
    assert!(select.value().is_empty());
}

#[test]
fn disabled_select_never_opens() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    select.set_disabled(true);
    select.handle(SelectEvent::TriggerClick);
    select.handle(SelectEvent::KeyDown(Key::Enter));
    assert!(!select.is_open());
    assert_eq!(registry.active_count(), 0);
}

#[test]
fn disabled_option_is_inert() {
    let registry = SharedRegistry::default();
    let mut options = origin_options();
    options[1].disabled = true;
    let mut select = SelectControl::new(options, registry);
    select.handle(SelectEvent::TriggerClick);
    assert_eq!(select.handle(SelectEvent::OptionClick(1)), None);
    assert!(select.is_open());
    assert!(select.value().is_empty());
}

#[test]
fn unmount_and_drop_release_listeners() {
    let registry = SharedRegistry::default();
    let mut select = sample_select(registry.clone());
    select.handle(SelectEvent::TriggerClick);
    select.unmount();
    assert_eq!(registry.active_count(), 0);

    // Dropping a still-open control must release as well.
    let mut select = sample_select(registry.clone());
    select.handle(SelectEvent::TriggerClick);
    assert_eq!(registry.active_count(), GlobalListener::ALL.len());
    drop(select);
    assert_eq!(registry.active_count(), 0);
    assert_eq!(registry.attaches(), registry.detaches());
}

#[tokio::test]
async fn record_store_loads_json_files() {
    let path = std::env::temp_dir().join("bioscope_records_test.json");
    let json = serde_json::to_string(RecordStore::sample().records()).unwrap();
    tokio::fs::write(&path, json).await.unwrap();

    let store = RecordStore::from_json_file(path.to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(store.records(), RecordStore::sample().records());
    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn record_store_loads_csv_files_with_header() {
    let path = std::env::temp_dir().join("bioscope_records_test.csv");
    let csv = "id,commonName,scientificName,taxa,species,origin\n\
               1,Eastern Grey Kangaroo,Macropus giganteus,Mammals,Kangaroo,Native\n\
               4,Common Myna,Acridotheres tristis,Birds,Myna,Non-native\n";
    tokio::fs::write(&path, csv).await.unwrap();

    let store = RecordStore::from_csv_file(path.to_str().unwrap())
        .await
        .unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.records()[1].origin, OriginStatus::NonNative);
    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn record_store_reports_bad_csv_lines() {
    let path = std::env::temp_dir().join("bioscope_records_bad.csv");
    tokio::fs::write(&path, "1,Dingo,Canis dingo,Mammals\n")
        .await
        .unwrap();

    let err = RecordStore::from_csv_file(path.to_str().unwrap())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("line 1"));
    let _ = tokio::fs::remove_file(&path).await;
}
