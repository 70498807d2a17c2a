//! Constructor signatures of the template contracts that take arguments.
//! Every other template is deployed with its bare creation bytecode.

use alloy::sol;

sol! {
    contract SequencerInbox {
        constructor(uint256 maxDataSize, address reader4844, bool isUsingFeeToken);
    }

    contract Inbox {
        constructor(uint256 maxDataSize);
    }

    struct BridgeTemplates {
        address bridge;
        address sequencerInbox;
        address inbox;
        address rollupEventInbox;
        address outbox;
    }

    contract BridgeCreator {
        constructor(BridgeTemplates memory ethBasedTemplates, BridgeTemplates memory erc20BasedTemplates);
    }

    contract OneStepProofEntry {
        constructor(address prover0, address proverMem, address proverMath, address proverHostIo);
    }
}
