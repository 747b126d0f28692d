pub mod analysis;
pub mod datasource;
pub mod export;
pub mod geometry;
pub mod map_token;
pub mod page;
pub mod project;
pub mod scene;
pub mod shape;

pub use analysis::Analysis;
pub use datasource::{Datasource, DatasourceRef, KnownDatasource};
pub use export::{nesting_depth, Export, ExportMask, ExportOptions, ExportStatus, NewExport};
pub use geometry::{Bbox, Geometry, GeometryType, Ring};
pub use map_token::MapToken;
pub use page::{ItemField, Page};
pub use project::{NewProject, OwnershipType, ProjectRecord, Visibility};
pub use scene::{FilterFields, Scene, SceneArea, SceneImage, SceneQuery, StatusFields};
pub use shape::Shape;
