/*
 * Responsibility
 * - Public surface of the middleware layer
 *   - auth::access (bearer auth), cors, http (request id / trace / limits)
 */
pub mod auth;
pub mod cors;
pub mod http;
