//! Middleware to authorize requests according to the policy table and store
//! session data on the request objects

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::RequestExt;
use axum::body::Body;
use axum::extract::Request;
use axum::http::Response;
use axum::response::IntoResponse;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use common::{Error, TokenError};
use models::Gebruiker;
use tower::{Layer, Service};
use uuid::Uuid;

use crate::AppState;
use crate::policy::{Access, Operation, Resource, required_access};
use crate::session::Session;

/// Middleware layer that enforces the access level of a single
/// `(resource, operation)` pair
///
/// Public operations pass through untouched. Any other operation requires an
/// `Authorization: Bearer <token>` header referring to a live session whose
/// gebruiker holds the required role. The [`Session`] is then stored as an
/// [`Extension`](axum::Extension), controllers that need it should ask for a
/// [`Session`] in their arguments
#[derive(Clone)]
pub struct PolicyLayer {
	state:  AppState,
	access: Access,
}

impl PolicyLayer {
	#[must_use]
	pub fn new(state: AppState, resource: Resource, operation: Operation) -> Self {
		Self { state, access: required_access(resource, operation) }
	}
}

impl<S> Layer<S> for PolicyLayer {
	type Service = PolicyMiddleware<S>;

	fn layer(&self, inner: S) -> Self::Service {
		PolicyMiddleware {
			inner,
			state: self.state.clone(),
			access: self.access,
		}
	}
}

#[derive(Clone)]
pub struct PolicyMiddleware<S> {
	inner:  S,
	state:  AppState,
	access: Access,
}

impl<S> Service<Request<Body>> for PolicyMiddleware<S>
where
	S: Service<Request, Response = Response<Body>> + Clone + Send + 'static,
	S::Future: Send + 'static,
{
	type Error = S::Error;
	type Future = Pin<
		Box<
			dyn Future<Output = Result<Self::Response, Self::Error>>
				+ Send
				+ 'static,
		>,
	>;
	type Response = S::Response;

	fn poll_ready(
		&mut self,
		cx: &mut Context<'_>,
	) -> Poll<Result<(), Self::Error>> {
		self.inner.poll_ready(cx)
	}

	#[instrument(skip_all)]
	fn call(&mut self, mut req: Request<Body>) -> Self::Future {
		let cloned_inner = self.inner.clone();
		let mut inner = std::mem::replace(&mut self.inner, cloned_inner);

		let state = self.state.clone();
		let access = self.access;

		Box::pin(async move {
			let Access::Role(required) = access else {
				return inner.call(req).await;
			};

			let Ok(TypedHeader(Authorization(bearer))) = req
				.extract_parts::<TypedHeader<Authorization<Bearer>>>()
				.await
			else {
				info!("got request without bearer token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let Ok(session_id) = bearer.token().parse::<Uuid>() else {
				info!("got request with malformed bearer token");

				return Ok(
					Error::from(TokenError::MissingAccessToken).into_response()
				);
			};

			let mut r_conn = state.redis_connection;

			let gebruiker_id =
				match Session::get_gebruiker_id(session_id, &mut r_conn).await {
					Ok(Some(id)) => id,
					Ok(None) => {
						warn!("attempted to authorize unknown session {session_id}");

						return Ok(Error::from(TokenError::MissingSession)
							.into_response());
					},
					Err(e) => return Ok(e.into_response()),
				};

			let gebruiker = {
				let conn = match state.database_pool.get().await {
					Ok(conn) => conn,
					Err(e) => return Ok(Error::from(e).into_response()),
				};

				match Gebruiker::get(gebruiker_id, &conn).await {
					Ok(g) => g,
					Err(Error::NotFound(_)) => {
						warn!(
							"session {session_id} belongs to removed gebruiker \
							 {gebruiker_id}"
						);

						return Ok(Error::from(TokenError::MissingSession)
							.into_response());
					},
					Err(e) => return Ok(e.into_response()),
				}
			};

			if !gebruiker.has_role(required) {
				debug!("gebruiker {gebruiker_id} lacks role {required}");

				return Ok(Error::Forbidden.into_response());
			}

			req.extensions_mut().insert(Session {
				id: session_id,
				gebruiker_id,
				roles: gebruiker.gebruiker.roles,
			});

			inner.call(req).await
		})
	}
}
