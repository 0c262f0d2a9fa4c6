use std::cell::RefCell;
use std::rc::Rc;

use bioscope::catalog::view::GalleryView;
use bioscope::catalog::RecordStore;
use bioscope::controls::SearchInput;

fn main() {
    let search = Rc::new(RefCell::new(SearchInput::default()));

    let mut view = GalleryView::new(RecordStore::sample());
    view.set_search_handle(Box::new(search.clone()));

    view.set_search("snake");
    search.borrow_mut().set_value("snake");
    view.set_taxa("Reptiles");
    println!("Filtered: {} record(s)", view.filtered().len());

    view.clear_all();
    println!(
        "After clear_all: {} record(s), search focused: {}",
        view.filtered().len(),
        search.borrow().is_focused()
    );
}
