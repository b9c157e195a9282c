pub mod import;
pub mod join;
pub mod lookup;
pub mod refresh;
pub mod state;
pub mod unjoin;

use chainlaunch_core::state::address;
use chainlaunch_core::GlobalState;
use chainlaunch_provider::NodeJoinState;
use chainlaunch_provider::node_join::RESOURCE_TYPE;

/// Look up a stored membership by resource name
pub(crate) fn stored_join(state: &GlobalState, name: &str) -> anyhow::Result<NodeJoinState> {
    let address = address(RESOURCE_TYPE, name);
    let record = state
        .get_resource(&address)
        .ok_or_else(|| anyhow::anyhow!("{} is not in the state", address))?;
    Ok(record.state()?)
}
