//! Typed object model for the API.
//!
//! Every polymorphic payload is a [`tagged_union!`](crate::codec) over a
//! closed discriminator enum, and every fixed string field is a closed enum,
//! so unknown values fail to decode instead of being carried along.
//!
//! - [`Block`]: page content
//! - [`Page`] and [`PropertyValue`]: pages and their values
//! - [`Database`] and [`PropertyConfig`]: databases and their schema
//! - [`User`]: people and bots
//! - [`RichText`]: styled text runs
//! - [`Filter`], [`SearchFilter`] and [`Sort`]: query inputs

mod block;
mod common;
mod database;
mod filter;
mod page;
mod rich_text;
mod sort;
mod user;

pub use block::{Block, BlockBody, BlockType, ChildPageBlock, TextBlock, ToDoBlock};
pub use common::{
    DateOrDateTime, DateValue, Empty, ExternalFile, File, FileSource, FileType, HostedFile, Icon,
    IconType, ObjectId, ObjectRef, Parent, ParentType, Timestamps,
};
pub use database::{
    Database, DatabaseProperty, FormulaConfig, NumberConfig, NumberFormat, PropertyConfig,
    PropertyType, RelationConfig, RollupConfig, RollupFunction, SelectColor, SelectConfig,
    SelectOption,
};
pub use filter::{
    CheckboxCondition, CheckboxFilter, DateCondition, DateFilter, FilesCondition, FilesFilter,
    Filter, FilterConditionType, FormulaCondition, FormulaFilter, MultiSelectCondition,
    MultiSelectFilter, NumberCondition, NumberFilter, ObjectKind, PeopleCondition, PeopleFilter,
    PropertyCondition, PropertyFilter, RelationCondition, RelationFilter, SearchFilter,
    SelectCondition, SelectFilter, TextCondition, TextFilter,
};
pub use page::{
    FormulaType, FormulaValue, Page, PageProperty, PropertyValue, RollupValue, RollupValueType,
};
pub use rich_text::{
    plain_text, AnnotationColor, Annotations, Equation, Link, Mention, MentionType, RichText,
    RichTextBody, RichTextType, TextContent,
};
pub use sort::{Sort, SortDirection, SortTimestamp};
pub use user::{Person, User, UserKind, UserType};
