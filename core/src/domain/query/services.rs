use tracing::{debug, instrument};

use crate::domain::{
    common::{QueryConfig, TotalCount, entities::app_errors::CoreError},
    query::{
        entities::{
            Document, FilterExpression, FilterOperator, FindQuery, PageRequest, PageResult,
            Projection, QuerySpec, Relation, SELECT_KEY, SORT_KEY, SortKey, SortOrder,
        },
        ports::Collection,
    },
};

/// Output of [`QueryTranslator::translate`], ready to be handed to a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedQuery {
    pub filter: FilterExpression,
    pub projection: Option<Projection>,
    pub sort: Vec<SortKey>,
    pub page: PageRequest,
}

/// Turns raw query parameters into a filtered, sorted, projected page of any collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryTranslator {
    config: QueryConfig,
}

impl QueryTranslator {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn translate(
        &self,
        spec: &QuerySpec,
        default_sort: &SortOrder,
    ) -> Result<TranslatedQuery, CoreError> {
        let filter = build_filter(spec)?;

        let projection = spec
            .get(SELECT_KEY)
            .map(Projection::from_string)
            .filter(|p| !p.is_empty());

        let sort = spec
            .get(SORT_KEY)
            .map(SortOrder::from_string)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_sort.clone());

        Ok(TranslatedQuery {
            filter,
            projection,
            sort: sort.keys,
            page: PageRequest::from_spec(spec, self.config.default_page_size),
        })
    }

    /// Run `spec` against `collection` and return one page plus its navigation links.
    #[instrument(skip_all, fields(params = spec.params().len()))]
    pub async fn execute<C: Collection>(
        &self,
        collection: &C,
        spec: &QuerySpec,
        default_sort: &SortOrder,
        relation: Option<&Relation>,
    ) -> Result<PageResult<Document>, CoreError> {
        let TranslatedQuery {
            filter,
            projection,
            sort,
            page,
        } = self.translate(spec, default_sort)?;

        // The unfiltered total keeps next/prev in step with the observed upstream behaviour;
        // they can overshoot the filtered result set.
        let total = match self.config.total_count {
            TotalCount::Unfiltered => collection.count(&FilterExpression::new()).await?,
            TotalCount::Filtered => collection.count(&filter).await?,
        };

        let items = collection
            .find(FindQuery {
                filter,
                projection,
                sort,
                skip: page.start_index(),
                limit: Some(page.limit),
                expand: relation.cloned(),
            })
            .await?;

        debug!(
            total,
            page = page.page,
            limit = page.limit,
            returned = items.len(),
            "executed paginated query"
        );

        Ok(PageResult::new(items, page.pagination(total)))
    }
}

/// Build the filter expression from every non-control parameter.
///
/// `field=value` is a literal match, `field[op]=value` with `op` one of `gt`, `gte`, `lt`,
/// `lte`, `in` is a comparison. Any other bracket form is rejected.
pub fn build_filter(spec: &QuerySpec) -> Result<FilterExpression, CoreError> {
    let mut filter = FilterExpression::new();

    for (key, value) in spec.filter_params() {
        if key.is_empty() {
            continue;
        }
        match parse_filter_key(key) {
            Some((field, None)) => filter.set_equals(field, value),
            Some((field, Some(operator))) => filter.add_comparison(field, operator, value),
            None => return Err(CoreError::validation(key, value)),
        }
    }

    Ok(filter)
}

/// Split `averageCost[gte]` into `("averageCost", Some(Gte))`, `name` into `("name", None)`.
fn parse_filter_key(key: &str) -> Option<(&str, Option<FilterOperator>)> {
    let Some(open) = key.find('[') else {
        return (!key.is_empty() && !key.contains(']')).then_some((key, None));
    };

    let field = &key[..open];
    let operator = key[open + 1..].strip_suffix(']')?;

    if field.is_empty() || field.contains(']') {
        return None;
    }

    operator
        .parse::<FilterOperator>()
        .ok()
        .map(|operator| (field, Some(operator)))
}
