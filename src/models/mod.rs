pub mod money;
pub mod sheet;
pub mod taxonomy;

pub use money::{Currency, MonetaryRange};
pub use sheet::{find_sheet, RawRow, RawSheet};
pub use taxonomy::{join_deal_types, DealType, Sector};
