//! The workflow category resource: `/workflow/category`.

use crate::STATUS_DICTIONARY_KEY;
use async_trait::async_trait;
use listdeck_api::RestClient;
use listdeck_core::{
    BindingError, ListRequest, ListRow, ResourceBinding, ResourceDescriptor, RowId, RowPage,
    SortState,
};
use serde::{Deserialize, Serialize};

const LIST_PATH: &str = "/workflow/category/list";
const EXPORT_PATH: &str = "/workflow/category/excel";
const COMMAND_PATH: &str = "/workflow/category";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFilter {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub create_time: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub category_id: RowId,
    pub category_code: String,
    pub category_name: String,
    pub category_sort: i64,
    pub status: i64,
    #[serde(default)]
    pub remark: Option<String>,
}

impl ListRow for CategoryRow {
    fn row_id(&self) -> RowId {
        self.category_id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCategoryCommand {
    pub category_code: String,
    pub category_name: String,
    pub category_sort: i64,
    pub status: i64,
    pub remark: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryCommand {
    pub category_id: RowId,
    #[serde(flatten)]
    pub fields: AddCategoryCommand,
}

pub struct CategoryBinding {
    client: RestClient,
    descriptor: ResourceDescriptor,
}

impl CategoryBinding {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            descriptor: ResourceDescriptor::new(
                "workflow category",
                SortState::ascending("categorySort"),
                STATUS_DICTIONARY_KEY,
            ),
        }
    }

    pub async fn create(&self, command: &AddCategoryCommand) -> Result<(), BindingError> {
        self.client
            .post_command(COMMAND_PATH, command)
            .await
            .map_err(BindingError::from)
    }

    pub async fn update(&self, command: &UpdateCategoryCommand) -> Result<(), BindingError> {
        self.client
            .put_command(COMMAND_PATH, command)
            .await
            .map_err(BindingError::from)
    }
}

#[async_trait]
impl ResourceBinding for CategoryBinding {
    type Filter = CategoryFilter;
    type Row = CategoryRow;

    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn list(&self, request: &ListRequest) -> Result<RowPage<CategoryRow>, BindingError> {
        self.client
            .get_page(LIST_PATH, request)
            .await
            .map_err(BindingError::from)
    }

    async fn remove(&self, ids: &[RowId]) -> Result<(), BindingError> {
        self.client
            .delete_ids(COMMAND_PATH, ids)
            .await
            .map_err(BindingError::from)
    }

    async fn export(&self, request: &ListRequest, file_name: &str) -> Result<(), BindingError> {
        self.client
            .download(EXPORT_PATH, request, file_name)
            .await
            .map(|_| ())
            .map_err(BindingError::from)
    }
}
