use crate::display;
use crate::ideas::IdeaRecord;
use crate::report;
use crate::store::IdeaStore;

pub fn handle(store: &IdeaStore) -> Vec<IdeaRecord> {
  report::announce("Idea History");
  let ideas = store.load();
  display::display_history(&ideas);
  ideas
}
