use revive_event_bus::{CHANNEL_CAPACITY, EventBus, EventReceiverExt};

#[derive(Clone, Debug, PartialEq, Eq)]
struct StatusLine(&'static str);

#[derive(Clone, Debug, PartialEq, Eq)]
struct RowSelected(u32);

#[tokio::test]
async fn broadcast_reaches_every_subscriber() {
    let bus = EventBus::new();
    let mut rx1 = bus.subscribe::<StatusLine>().unwrap();
    let mut rx2 = bus.subscribe::<StatusLine>().unwrap();

    assert_eq!(bus.publish(StatusLine("watcher started")).unwrap(), 2);

    assert_eq!(*EventReceiverExt::recv(&mut rx1).await.unwrap(), StatusLine("watcher started"));
    assert_eq!(*EventReceiverExt::recv(&mut rx2).await.unwrap(), StatusLine("watcher started"));
}

#[tokio::test]
async fn publish_without_subscribers_is_dropped_not_failed() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(RowSelected(3)).unwrap(), 0);
    assert_eq!(bus.subscriber_count::<RowSelected>(), 0);

    let mut rx = bus.subscribe::<RowSelected>().unwrap();
    assert_eq!(bus.subscriber_count::<RowSelected>(), 1);
    bus.publish(RowSelected(4)).unwrap();
    assert_eq!(EventReceiverExt::recv(&mut rx).await.unwrap().0, 4);
}

#[tokio::test]
async fn lagged_receiver_skips_to_the_fresh_tail() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<RowSelected>().unwrap();
    let published = u32::try_from(CHANNEL_CAPACITY).unwrap() + 36;

    for i in 0..published {
        bus.publish(RowSelected(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert!(first.0 >= 36, "expected tail of buffer, got {}", first.0);
    let second = EventReceiverExt::recv(&mut rx).await.unwrap();
    assert_eq!(second.0, first.0 + 1);
}

#[tokio::test]
async fn event_types_are_isolated() {
    let bus = EventBus::new();
    let mut rows = bus.subscribe::<RowSelected>().unwrap();
    let mut status = bus.subscribe::<StatusLine>().unwrap();

    bus.publish(RowSelected(7)).unwrap();
    bus.publish(StatusLine("ok")).unwrap();

    assert_eq!(EventReceiverExt::recv(&mut rows).await.unwrap().0, 7);
    assert_eq!(EventReceiverExt::recv(&mut status).await.unwrap().0, "ok");
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<RowSelected>().unwrap();

    assert_eq!(bus.shutdown(), 1);
    assert!(EventReceiverExt::recv(&mut rx).await.is_none());
}
