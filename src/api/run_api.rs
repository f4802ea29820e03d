// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

use std::io::Read;
use std::sync::Arc;
use iron::{Iron, IronResult, Request, Response};
use iron::mime::{Mime, SubLevel, TopLevel};
use iron::status::{self, Status};
use hyper::header::AccessControlAllowOrigin;
use router::Router;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::error::{CatalogError, Result};
use crate::model::{Application, Resource};
use crate::service::CatalogService;

header! { (CatalogUser, "X-Catalog-User") => [String] }

pub fn run_api(service: Arc<CatalogService>, host: &str, port: u16) -> Result<()> {
    info!("api starting");
    service.catalog().send_ping()?;

    let router = build_router(service);
    let address = format!("{}:{}", host, port);

    info!("API Server listening at: {}", address);
    Iron::new(router)
        .http(address.as_str())
        .map_err(|err| CatalogError::Server(format!("cannot listen on {}: {}", address, err)))?;
    Ok(())
}

pub fn build_router(service: Arc<CatalogService>) -> Router {
    let mut router = Router::new();
    router.get("/admin/ping", handle_ping, "ping");

    let list_resources_service = service.clone();
    router.get("/resources",
               move |request: &mut Request| handle_list_resources(&list_resources_service, request),
               "list_resources");

    let available_service = service.clone();
    router.get("/resources/available",
               move |_r: &mut Request| respond(available_service.available_resources(), status::Ok),
               "available_resources");

    let resource_service = service.clone();
    router.get("/resources/:name",
               move |request: &mut Request| handle_resource(&resource_service, request),
               "resource");

    let add_resource_service = service.clone();
    router.post("/resources",
                move |request: &mut Request| handle_add_resource(&add_resource_service, request),
                "add_resource");

    let update_resource_service = service.clone();
    router.put("/resources/:name",
               move |request: &mut Request| handle_update_resource(&update_resource_service, request),
               "update_resource");

    let remove_resource_service = service.clone();
    router.delete("/resources/:name",
                  move |request: &mut Request| handle_remove_resource(&remove_resource_service, request),
                  "remove_resource");

    let resource_applications_service = service.clone();
    router.get("/resources/:name/applications",
               move |request: &mut Request| handle_resource_applications(&resource_applications_service, request),
               "resource_applications");

    let applications_service = service.clone();
    router.get("/applications",
               move |request: &mut Request| handle_applications(&applications_service, request),
               "applications");

    let application_service = service.clone();
    router.get("/applications/:id",
               move |request: &mut Request| handle_application(&application_service, request),
               "application");

    let add_application_service = service.clone();
    router.post("/applications",
                move |request: &mut Request| handle_add_application(&add_application_service, request),
                "add_application");

    let update_application_service = service.clone();
    router.put("/applications/:id",
               move |request: &mut Request| handle_update_application(&update_application_service, request),
               "update_application");

    let remove_application_service = service.clone();
    router.delete("/applications/:id",
                  move |request: &mut Request| handle_remove_application(&remove_application_service, request),
                  "remove_application");

    let middlewares_service = service.clone();
    router.get("/middlewares",
               move |_r: &mut Request| respond(middlewares_service.middlewares(), status::Ok),
               "middlewares");

    let refresh_service = service.clone();
    router.post("/middlewares/refresh",
                move |request: &mut Request| {
                    respond(refresh_service.refresh_middlewares(user(request).as_ref().map(|u| u.as_str())),
                            status::Ok)
                },
                "refresh_middlewares");

    let job_properties_service = service.clone();
    router.get("/jobs/properties",
               move |request: &mut Request| handle_job_properties(&job_properties_service, request),
               "job_properties");

    let export_service = service;
    router.get("/export",
               move |request: &mut Request| {
                   respond(export_service.export(user(request).as_ref().map(|u| u.as_str())), status::Ok)
               },
               "export");

    router
}

fn handle_ping(_request: &mut Request) -> IronResult<Response> {
    let mut response = Response::with((status::Ok, "pong"));
    response.headers.set(AccessControlAllowOrigin::Any);
    Ok(response)
}

fn handle_list_resources(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let resource_type = query_param(request, "type");
    let name = query_param(request, "name");
    respond(service.list_resources(resource_type.as_ref().map(|t| t.as_str()),
                                   name.as_ref().map(|n| n.as_str())),
            status::Ok)
}

fn handle_resource(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    respond(path_param(request, "name").and_then(|name| service.get_resource(&name)),
            status::Ok)
}

fn handle_add_resource(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = read_json::<Resource>(request)
        .and_then(|resource| service.add_resource(user.as_ref().map(|u| u.as_str()), resource));
    respond(result, status::Created)
}

fn handle_update_resource(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = path_param(request, "name").and_then(|name| {
        let resource = read_json::<Resource>(request)?;
        service.update_resource(user.as_ref().map(|u| u.as_str()), &name, resource)
    });
    respond(result, status::Ok)
}

fn handle_remove_resource(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = path_param(request, "name")
        .and_then(|name| service.remove_resource(user.as_ref().map(|u| u.as_str()), &name));
    respond(result, status::Ok)
}

fn handle_resource_applications(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    respond(path_param(request, "name").and_then(|name| service.applications_on_resource(&name)),
            status::Ok)
}

fn handle_applications(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    match query_param(request, "q") {
        Some(query) => respond(service.search_applications(&query), status::Ok),
        None => respond(service.list_applications(), status::Ok),
    }
}

fn handle_application(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    respond(path_param(request, "id").and_then(|id| service.get_application(&id)),
            status::Ok)
}

fn handle_add_application(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = read_json::<Application>(request)
        .and_then(|application| service.add_application(user.as_ref().map(|u| u.as_str()), application));
    respond(result, status::Created)
}

fn handle_update_application(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = path_param(request, "id").and_then(|id| {
        let application = read_json::<Application>(request)?;
        service.update_application(user.as_ref().map(|u| u.as_str()), &id, application)
    });
    respond(result, status::Ok)
}

fn handle_remove_application(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let user = user(request);
    let result = path_param(request, "id")
        .and_then(|id| service.remove_application(user.as_ref().map(|u| u.as_str()), &id));
    respond(result, status::Ok)
}

fn handle_job_properties(service: &CatalogService, request: &mut Request) -> IronResult<Response> {
    let resource = query_param(request, "resource");
    let application = query_param(request, "application");
    let queue = query_param(request, "queue");

    let result = match (resource, application) {
        (Some(resource), Some(application)) => service.job_properties(&resource, &application, queue),
        _ => Err(CatalogError::validation("resource and application are required")),
    };
    respond(result, status::Ok)
}

fn user(request: &Request) -> Option<String> {
    request.headers
        .get::<CatalogUser>()
        .map(|user| user.0.trim().to_string())
        .filter(|user| !user.is_empty())
}

fn path_param(request: &Request, key: &str) -> Result<String> {
    request.extensions
        .get::<Router>()
        .and_then(|params| params.find(key))
        .map(|value| value.to_string())
        .ok_or_else(|| CatalogError::validation(format!("missing path parameter '{}'", key)))
}

fn query_param(request: &Request, key: &str) -> Option<String> {
    let url = request.url.clone().into_generic_url();
    let value = url.query_pairs()
        .find(|pair| pair.0 == key)
        .map(|pair| pair.1.into_owned());
    value.filter(|value| !value.trim().is_empty())
}

fn read_json<T: DeserializeOwned>(request: &mut Request) -> Result<T> {
    let mut body = String::new();
    request.body.read_to_string(&mut body)?;
    Ok(serde_json::from_str(&body)?)
}

fn respond<T: Serialize>(result: Result<T>, ok_status: Status) -> IronResult<Response> {
    match result.and_then(|value| Ok(serde_json::to_string(&value)?)) {
        Ok(body) => Ok(json_response(ok_status, body)),
        Err(err) => Ok(error_response(&err)),
    }
}

/// HTTP status a failed catalog operation is reported with.
pub fn status_for(err: &CatalogError) -> Status {
    match *err {
        CatalogError::ResourceNotFound(_) |
        CatalogError::ApplicationNotFound(_) => status::NotFound,
        CatalogError::Validation(_) |
        CatalogError::DuplicateResource(_) |
        CatalogError::DuplicateApplication(_) |
        CatalogError::ResourceInUse { .. } |
        CatalogError::InvalidResourceType(_) |
        CatalogError::UnsupportedResourceType(_) |
        CatalogError::Json(_) => status::BadRequest,
        CatalogError::PermissionDenied { .. } => status::Forbidden,
        CatalogError::Middleware(_) => status::BadGateway,
        _ => status::InternalServerError,
    }
}

fn error_body(err: &CatalogError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}

fn error_response(err: &CatalogError) -> Response {
    let status = status_for(err);
    if status == status::InternalServerError || status == status::BadGateway {
        error!("request failed: {}", err);
    } else {
        debug!("request rejected: {}", err);
    }
    json_response(status, error_body(err))
}

fn json_response(status: Status, body: String) -> Response {
    let content_type = Mime(TopLevel::Application, SubLevel::Json, Vec::new());
    let mut response = Response::with((content_type, status, body));
    response.headers.set(AccessControlAllowOrigin::Any);
    response
}
