use shoes_ecs_model::{AddInstance, Instance, ResourceType};

use crate::proto;

impl From<proto::ResourceType> for ResourceType {
    fn from(rt: proto::ResourceType) -> Self {
        match rt {
            proto::ResourceType::Unknown => ResourceType::Unknown,
            proto::ResourceType::Nano => ResourceType::Nano,
            proto::ResourceType::Micro => ResourceType::Micro,
            proto::ResourceType::Small => ResourceType::Small,
            proto::ResourceType::Medium => ResourceType::Medium,
            proto::ResourceType::Large => ResourceType::Large,
            proto::ResourceType::XLarge => ResourceType::XLarge,
            proto::ResourceType::XLarge2 => ResourceType::XLarge2,
            proto::ResourceType::XLarge3 => ResourceType::XLarge3,
            proto::ResourceType::XLarge4 => ResourceType::XLarge4,
        }
    }
}

impl From<ResourceType> for proto::ResourceType {
    fn from(rt: ResourceType) -> Self {
        match rt {
            ResourceType::Unknown => proto::ResourceType::Unknown,
            ResourceType::Nano => proto::ResourceType::Nano,
            ResourceType::Micro => proto::ResourceType::Micro,
            ResourceType::Small => proto::ResourceType::Small,
            ResourceType::Medium => proto::ResourceType::Medium,
            ResourceType::Large => proto::ResourceType::Large,
            ResourceType::XLarge => proto::ResourceType::XLarge,
            ResourceType::XLarge2 => proto::ResourceType::XLarge2,
            ResourceType::XLarge3 => proto::ResourceType::XLarge3,
            ResourceType::XLarge4 => proto::ResourceType::XLarge4,
        }
    }
}

/// Unrecognized resource types (newer hosts) degrade to `Unknown`: the value is only echoed.
impl From<proto::AddInstanceRequest> for AddInstance {
    fn from(req: proto::AddInstanceRequest) -> Self {
        let resource_type = proto::ResourceType::try_from(req.resource_type)
            .map(ResourceType::from)
            .unwrap_or_default();

        AddInstance {
            runner_name: req.runner_name,
            setup_script: req.setup_script,
            resource_type,
            labels: req.labels,
        }
    }
}

impl From<Instance> for proto::AddInstanceResponse {
    fn from(inst: Instance) -> Self {
        proto::AddInstanceResponse {
            cloud_id: inst.cloud_id.into_inner(),
            shoes_type: inst.shoes_type,
            ip_address: inst.ip_address,
            resource_type: proto::ResourceType::from(inst.resource_type) as i32,
        }
    }
}
