/*!
 * Resource trees and their on-disk format.
 *
 * - `model`: source and output tree types
 * - `xml`: Android `strings.xml` reader and writer
 */

pub mod model;
pub mod xml;

pub use self::model::{
    KeyedItem, OutputItem, OutputNode, OutputTree, ResourceNode, ResourceText, ResourceTree,
};
pub use self::xml::{WriteOptions, parse_resources, write_resources};
