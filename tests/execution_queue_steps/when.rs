//! When steps for execution queue BDD scenarios.

use super::world::{QueueWorld, run_async};
use execution_queue::queue::{
    domain::{ExecutionQueueRecord, ExecutionStatus, Priority, RecordPatch, ServiceOrderId},
    services::CreateRecordRequest,
};
use eyre::WrapErr;
use futures::TryStreamExt;
use rstest_bdd_macros::when;

#[when(r#"the workshop queues service order {service_order_id:u64} with priority "{priority}""#)]
fn queue_service_order(
    world: &mut QueueWorld,
    service_order_id: u64,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed = Priority::try_from(priority.as_str()).wrap_err("parse priority")?;
    let request = CreateRecordRequest::new(service_order_id).with_priority(parsed);
    world.last_record_result = Some(run_async(world.service.create(request)));
    Ok(())
}

#[when("service order {service_order_id:u64} is requested")]
fn request_service_order(
    world: &mut QueueWorld,
    service_order_id: u64,
) -> Result<(), eyre::Report> {
    let id = ServiceOrderId::new(service_order_id).wrap_err("build service order id")?;
    world.last_record_result = Some(run_async(world.service.get(id)));
    Ok(())
}

#[when(r#"service order {service_order_id:u64} is moved to status "{status}""#)]
fn move_service_order(
    world: &mut QueueWorld,
    service_order_id: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let id = ServiceOrderId::new(service_order_id).wrap_err("build service order id")?;
    let parsed = ExecutionStatus::try_from(status.as_str()).wrap_err("parse status")?;
    let patch = RecordPatch::new().with_status(parsed);
    world.last_record_result = Some(run_async(world.service.update(id, patch)));
    Ok(())
}

#[when("the whole queue is listed")]
fn list_whole_queue(world: &mut QueueWorld) -> Result<(), eyre::Report> {
    let listed = run_async(world.service.list_ordered()).wrap_err("list queue")?;
    world.last_listing = Some(listed);
    Ok(())
}

#[when(r#"the records with status "{status}" are listed"#)]
fn list_by_status(world: &mut QueueWorld, status: String) -> Result<(), eyre::Report> {
    let parsed = ExecutionStatus::try_from(status.as_str()).wrap_err("parse status")?;
    let listed: Vec<ExecutionQueueRecord> =
        run_async(world.service.list_by_status(parsed).try_collect())
            .wrap_err("list records by status")?;
    world.last_listing = Some(listed);
    Ok(())
}

#[when("the next record in the queue is requested")]
fn request_next_record(world: &mut QueueWorld) {
    world.last_record_result = Some(run_async(world.service.next_in_queue()));
}
