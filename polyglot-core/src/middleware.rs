// Middleware system and locale resolution for incoming requests

use crate::path::locale_index_location;
use crate::{Error, HttpRequest, HttpResponse};
use async_trait::async_trait;
use polyglot_i18n::{Locale, LocaleSettings};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Type alias for the next handler in the middleware chain
pub type Next = Box<
    dyn FnOnce(HttpRequest) -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>
        + Send,
>;

/// Type alias for handler functions
pub type HandlerFn = Arc<
    dyn Fn(HttpRequest) -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>
        + Send
        + Sync,
>;

/// Middleware trait for processing requests before they reach the handler
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Process the request and optionally pass to next middleware
    async fn handle(&self, req: HttpRequest, next: Next) -> Result<HttpResponse, Error>;
}

/// Middleware chain executor
#[derive(Clone)]
pub struct MiddlewareChain {
    middlewares: Arc<Vec<Arc<dyn Middleware>>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Arc::new(Vec::new()),
        }
    }

    /// Add a middleware to the chain
    pub fn use_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        let mut mws = (*self.middlewares).clone();
        mws.push(Arc::new(middleware));
        self.middlewares = Arc::new(mws);
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Execute the middleware chain with a handler
    pub async fn apply(&self, req: HttpRequest, handler: HandlerFn) -> Result<HttpResponse, Error> {
        debug!(
            middleware_count = self.middlewares.len(),
            path = %req.path,
            method = %req.method,
            "Executing middleware chain"
        );
        self.execute_from(0, req, handler).await
    }

    fn execute_from(
        &self,
        index: usize,
        req: HttpRequest,
        handler: HandlerFn,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>> {
        if index >= self.middlewares.len() {
            trace!("Middleware chain complete, calling handler");
            handler(req)
        } else {
            let middleware = self.middlewares[index].clone();
            let chain = self.clone();
            let handler_clone = handler.clone();

            trace!(middleware_index = index, "Executing middleware");
            Box::pin(async move {
                middleware
                    .handle(
                        req,
                        Box::new(move |req| chain.execute_from(index + 1, req, handler_clone)),
                    )
                    .await
            })
        }
    }
}

impl Default for MiddlewareChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of locale resolution for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// Handle the request with this active locale.
    Continue { locale: Locale },
    /// Answer with a redirect to the locale's index resource.
    Redirect { locale: Locale, location: String },
}

impl LocaleDecision {
    pub fn locale(&self) -> &Locale {
        match self {
            LocaleDecision::Continue { locale } | LocaleDecision::Redirect { locale, .. } => locale,
        }
    }
}

/// Picks the active locale from the first path segment.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    settings: LocaleSettings,
    index_file: String,
    redirect_locale_root: bool,
}

impl LocaleResolver {
    pub fn new(settings: LocaleSettings) -> Self {
        Self {
            settings,
            index_file: "index.html".to_string(),
            redirect_locale_root: true,
        }
    }

    pub fn with_index_file(mut self, index_file: impl Into<String>) -> Self {
        self.index_file = index_file.into();
        self
    }

    pub fn with_root_redirect(mut self, enable: bool) -> Self {
        self.redirect_locale_root = enable;
        self
    }

    pub fn settings(&self) -> &LocaleSettings {
        &self.settings
    }

    /// Resolve a request path such as `/it/about?x=1`.
    ///
    /// Unknown first segments are not errors: the default locale applies.
    pub fn resolve(&self, path: &str) -> LocaleDecision {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_start_matches('/');
        let (segment, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        let Some(locale) = self.settings.find_segment(segment) else {
            return LocaleDecision::Continue {
                locale: self.settings.default_locale().clone(),
            };
        };

        if self.redirect_locale_root && rest.trim_matches('/').is_empty() {
            return LocaleDecision::Redirect {
                locale: locale.clone(),
                location: locale_index_location(locale, &self.settings, &self.index_file),
            };
        }

        LocaleDecision::Continue {
            locale: locale.clone(),
        }
    }
}

/// Sets the active locale on each request and redirects bare locale roots.
#[derive(Debug, Clone)]
pub struct LocaleMiddleware {
    resolver: Arc<LocaleResolver>,
}

impl LocaleMiddleware {
    pub fn new(resolver: LocaleResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }
}

#[async_trait]
impl Middleware for LocaleMiddleware {
    async fn handle(&self, mut req: HttpRequest, next: Next) -> Result<HttpResponse, Error> {
        match self.resolver.resolve(&req.path) {
            LocaleDecision::Redirect { locale, location } => {
                info!(path = %req.path, locale = %locale, location = %location, "Redirecting locale root");
                Ok(HttpResponse::redirect(location).with_header("Content-Language", locale.tag()))
            }
            LocaleDecision::Continue { locale } => {
                trace!(path = %req.path, locale = %locale, "Active locale");
                let tag = locale.tag();
                req.locale = Some(locale);

                let mut response = next(req).await?;
                response
                    .headers
                    .entry("Content-Language".to_string())
                    .or_insert(tag);
                Ok(response)
            }
        }
    }
}
