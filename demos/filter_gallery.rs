use bioscope::catalog::criteria::CriteriaState;
use bioscope::catalog::{filter, RecordStore};

fn main() {
    let store = RecordStore::sample();

    let criteria = CriteriaState {
        search: "eastern".to_string(),
        taxa: "Reptiles".to_string(),
        ..Default::default()
    };

    let matches = filter::apply(store.records(), &criteria);
    println!("Matches: {}", matches.len());
    for record in matches.iter() {
        println!(
            "{} ({}) - {}",
            record.common_name, record.scientific_name, record.taxa
        );
    }
}
