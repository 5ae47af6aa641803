use querywire::prelude::*;
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn describe_instances() -> ServiceModel {
    ServiceModel::builder("ec2")
        .api_version("2014-06-15")
        .protocol(QueryProtocol::Ec2)
        .operation(
            "DescribeInstances",
            Shape::structure([
                (
                    "InstanceIds",
                    Shape::list(Shape::string()).with_wire_name("InstanceId"),
                ),
                (
                    "Filters",
                    Shape::list(Shape::structure([
                        ("Name", Shape::string()),
                        (
                            "Values",
                            Shape::list(Shape::string()).with_wire_name("Value"),
                        ),
                    ]))
                    .with_wire_name("Filter"),
                ),
            ]),
        )
        .build()
        .expect("ec2 model")
}

#[test]
fn shared_operation_serializes_concurrently() {
    let model = Arc::new(describe_instances());
    let reference = model
        .operation("DescribeInstances")
        .unwrap()
        .build_parameters_from_args(json!({
            "instance_ids": ["i-1", "i-2"],
            "filters": [{ "Name": "state", "Values": ["running"] }]
        }))
        .unwrap();

    thread::scope(|scope| {
        for _ in 0..8 {
            let model = Arc::clone(&model);
            let reference = &reference;
            scope.spawn(move || {
                let op = model.operation("DescribeInstances").unwrap();
                for _ in 0..50 {
                    let params = op
                        .build_parameters_from_args(json!({
                            "instance_ids": ["i-1", "i-2"],
                            "filters": [{ "Name": "state", "Values": ["running"] }]
                        }))
                        .unwrap();
                    assert_eq!(&params, reference);
                }
            });
        }
    });

    assert_eq!(reference.get("Filter.1.Value.1"), Some("running"));
    assert_eq!(reference.len(), 4);
}

#[test]
fn handles_are_cheap_to_clone_across_threads() {
    let model = describe_instances();
    let op = model.operation("DescribeInstances").unwrap().clone();
    let handle = thread::spawn(move || {
        op.build_parameters(json!({ "InstanceIds": ["i-9"] }))
            .unwrap()
    });
    let params = handle.join().unwrap();
    assert_eq!(params.get("InstanceId.1"), Some("i-9"));
}
